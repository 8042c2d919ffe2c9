//! Dashboard statistics derived from screens, media and playlists.

use serde::Serialize;

use crate::screen::Screen;

/// Storage quota shown on the admin dashboard (GiB).
pub const STORAGE_QUOTA_GIB: f64 = 5.0;

/// Number of screens listed under "recent activity".
pub const RECENT_SCREENS_LIMIT: usize = 5;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub total_screens: usize,
    pub online_screens: usize,
    /// Rounded percentage of screens online; 0 when there are no screens.
    pub active_percentage: u32,
    /// Storage used, in GiB rounded to one decimal.
    pub storage_used_gib: f64,
    /// Share of [`STORAGE_QUOTA_GIB`] in use, capped at 100.
    pub storage_percentage: u32,
    pub total_playlists: usize,
    /// Most recently seen screens first.
    pub recent_screens: Vec<Screen>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientDashboard {
    pub total_screens: usize,
    pub online_screens: usize,
}

/// Build the admin/editor dashboard.
pub fn admin_dashboard(
    mut screens: Vec<Screen>,
    media_sizes: impl IntoIterator<Item = u64>,
    total_playlists: usize,
) -> AdminDashboard {
    let total_screens = screens.len();
    let online_screens = screens.iter().filter(|s| s.is_online()).count();
    let total_bytes: u64 = media_sizes.into_iter().sum();
    let storage_used_gib = round_one_decimal(total_bytes as f64 / BYTES_PER_GIB);

    // Never-seen screens sort last.
    screens.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
    screens.truncate(RECENT_SCREENS_LIMIT);

    AdminDashboard {
        total_screens,
        online_screens,
        active_percentage: percentage(online_screens as f64, total_screens as f64),
        storage_used_gib,
        storage_percentage: percentage(storage_used_gib, STORAGE_QUOTA_GIB).min(100),
        total_playlists,
        recent_screens: screens,
    }
}

/// Build a client's dashboard over the screens assigned to them.
pub fn client_dashboard(screens: &[Screen]) -> ClientDashboard {
    ClientDashboard {
        total_screens: screens.len(),
        online_screens: screens.iter().filter(|s| s.is_online()).count(),
    }
}

fn percentage(part: f64, whole: f64) -> u32 {
    if whole <= 0.0 {
        return 0;
    }
    (part / whole * 100.0).round() as u32
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
