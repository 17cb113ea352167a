//! System tray icon with the global enable toggle.
//!
//! Manages the tray icon and its context menu: a checkable "Global hotkeys"
//! item mirroring the enable flag, and Exit.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{info, instrument};
use tray_icon::menu::{CheckMenuItem, Menu, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    toggle_item: CheckMenuItem,
    toggle_item_id: MenuId,
    exit_item_id: MenuId,
}

impl TrayManager {
    /// Create a new tray manager with the toggle reflecting `enabled`.
    #[track_caller]
    #[instrument]
    pub fn new(enabled: bool) -> AppResult<Self> {
        let menu = Menu::new();

        let toggle_item = CheckMenuItem::new("Global hotkeys", true, enabled, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let toggle_id = toggle_item.id().clone();
        let exit_id = exit_item.id().clone();

        menu.append(&toggle_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add toggle menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        menu.append(&exit_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add exit menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let icon = Self::load_icon()?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip("Hotslot")
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            toggle_item,
            toggle_item_id: toggle_id,
            exit_item_id: exit_id,
        })
    }

    /// Sync the toggle checkmark with the global enable flag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.toggle_item.set_checked(enabled);

        let tooltip = if enabled {
            "Hotslot"
        } else {
            "Hotslot - Disabled"
        };
        if let Err(e) = self.tray_icon.set_tooltip(Some(tooltip)) {
            info!(error = ?e, "Failed to update tray tooltip");
        }
    }

    /// Load icon from compile-time embedded PNG bytes.
    ///
    /// The icon is embedded via include_bytes! so it works regardless of
    /// install location — no hardcoded filesystem paths.
    #[track_caller]
    fn load_icon() -> AppResult<Icon> {
        let png_bytes: &[u8] = include_bytes!("../resources/icons/hotslot.png");

        let img = image::load_from_memory(png_bytes).map_err(|e| AppError::TrayError {
            reason: format!("Failed to decode embedded icon: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let rgba = img.into_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Get the toggle menu item ID.
    pub fn toggle_item_id(&self) -> &MenuId {
        &self.toggle_item_id
    }

    /// Get the exit menu item ID.
    pub fn exit_item_id(&self) -> &MenuId {
        &self.exit_item_id
    }
}
