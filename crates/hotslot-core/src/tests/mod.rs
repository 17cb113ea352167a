mod dispatch;
mod keys;
mod recorder;
mod slot;
