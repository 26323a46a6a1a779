//! Window configuration resource
//!
//! Centralizes window settings for the application, allowing easy configuration
//! and modification of window properties.

use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow, Window, WindowResizeConstraints, WindowResolution};

/// Configuration for the primary application window
#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Smallest size the user may shrink the window to
    pub min_width: f32,
    pub min_height: f32,
    /// Whether the window should be resizable
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Chessboy".to_string(),
            width: 1920,
            height: 1080,
            min_width: 800.0,
            min_height: 600.0,
            resizable: true,
        }
    }
}

impl WindowConfig {
    /// Create a Bevy Window from this configuration
    pub fn to_window(&self) -> Window {
        Window {
            title: self.title.clone(),
            resolution: WindowResolution::new(self.width, self.height),
            resizable: self.resizable,
            resize_constraints: WindowResizeConstraints {
                min_width: self.min_width,
                min_height: self.min_height,
                ..default()
            },
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

/// Push the resource's title and size limits to the primary window
///
/// The initial window is built from [`WindowConfig::to_window`]; this keeps
/// it in step when the resource changes at runtime. The current size is left
/// to the user.
pub fn apply_window_config(config: Res<WindowConfig>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.title = config.title.clone();
    window.resizable = config.resizable;
    window.resize_constraints.min_width = config.min_width;
    window.resize_constraints.min_height = config.min_height;
    debug!("[WINDOW] Applied window config `{}`", config.title);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_config_to_window() {
        let window = WindowConfig::default().to_window();
        assert_eq!(window.title, "Chessboy");
        assert!(window.resizable);
        assert_eq!(window.resize_constraints.min_width, 800.0);
        assert_eq!(window.resize_constraints.min_height, 600.0);
    }

    #[test]
    fn test_config_changes_reach_primary_window() {
        use bevy::ecs::system::RunSystemOnce;

        let mut world = World::new();
        let window = world
            .spawn((WindowConfig::default().to_window(), PrimaryWindow))
            .id();
        world.insert_resource(WindowConfig {
            title: "Chessboy - analysis".to_string(),
            min_width: 1024.0,
            resizable: false,
            ..default()
        });

        world.run_system_once(apply_window_config).unwrap();

        let window = world.get::<Window>(window).unwrap();
        assert_eq!(window.title, "Chessboy - analysis");
        assert!(!window.resizable);
        assert_eq!(window.resize_constraints.min_width, 1024.0);
        assert_eq!(window.resize_constraints.min_height, 600.0);
    }
}
