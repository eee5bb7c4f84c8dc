use std::path::PathBuf;
use std::time::Duration;

use crate::app::ScreenOptions;
use crate::config;

/// Playlist location: the first CLI argument, else the working directory.
pub fn playlist_path(arg: Option<String>) -> PathBuf {
    arg.map(PathBuf::from).unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    })
}

pub fn screen_options(settings: &config::Settings) -> ScreenOptions {
    ScreenOptions {
        repeat: settings.playback.repeat_mode.into(),
        autoplay: settings.playback.autoplay,
        scroll_duration: Duration::from_millis(settings.carousel.scroll_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepeatModeSetting;
    use crate::player::RepeatMode;

    #[test]
    fn argument_wins_over_cwd() {
        assert_eq!(
            playlist_path(Some("/music/set.toml".to_string())),
            PathBuf::from("/music/set.toml")
        );
    }

    #[test]
    fn options_follow_playback_and_carousel_settings() {
        let mut settings = config::Settings::default();
        settings.playback.repeat_mode = RepeatModeSetting::Queue;
        settings.playback.autoplay = true;
        settings.carousel.scroll_ms = 0;

        let opts = screen_options(&settings);
        assert_eq!(opts.repeat, RepeatMode::Queue);
        assert!(opts.autoplay);
        assert_eq!(opts.scroll_duration, Duration::ZERO);
    }
}
