mod store_file;
