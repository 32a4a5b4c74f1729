//! Game settings and preferences
//!
//! Presentation-only: nothing here changes the simulation. A frontend runs
//! each outgoing `GameEvent` past `Settings::allows` and scales shakes with
//! `effective_shake_intensity`.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, Validate};
use crate::sim::events::{GameEvent, SoundKind};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on impacts and pickups
    pub screen_shake: bool,
    /// Shake strength multiplier
    pub shake_scale: f32,

    // === HUD ===
    /// On-screen alerts and tutorial boxes
    pub alerts: bool,

    // === Audio ===
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Ambient loop volume (0.0 - 1.0)
    pub ambient_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            shake_scale: 1.0,

            alerts: true,

            sound: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            ambient_volume: 0.5,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Shake intensity after preferences, 0 when shake is off
    pub fn effective_shake_intensity(&self, intensity: f32) -> f32 {
        if self.effective_screen_shake() {
            intensity * self.shake_scale
        } else {
            0.0
        }
    }

    /// Final playback volume for a sound
    pub fn volume_for(&self, sound: SoundKind) -> f32 {
        if !self.sound {
            return 0.0;
        }
        let channel = match sound {
            SoundKind::AmbientLoop => self.ambient_volume,
            SoundKind::Impact | SoundKind::Collect => self.sfx_volume,
        };
        self.master_volume * channel
    }

    /// Whether the frontend should act on this event at all
    pub fn allows(&self, event: &GameEvent) -> bool {
        match event {
            GameEvent::PlaySound(kind) => self.volume_for(*kind) > 0.0,
            GameEvent::Shake { intensity, .. } => self.effective_shake_intensity(*intensity) > 0.0,
            GameEvent::ShowAlert(_) => self.alerts,
            _ => true,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<(), ConfigError> {
        let volumes = [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("ambient_volume", self.ambient_volume),
        ];
        for (name, v) in volumes {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::Invalid(format!("{name} must be within 0..=1, got {v}")));
            }
        }
        if self.shake_scale < 0.0 {
            return Err(ConfigError::Invalid("shake_scale is negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::AlertKind;

    #[test]
    fn test_defaults_allow_everything() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.allows(&GameEvent::PlaySound(SoundKind::Impact)));
        assert!(settings.allows(&GameEvent::shake(0.3, 5.0)));
        assert!(settings.allows(&GameEvent::ShowAlert(AlertKind::SystemAlert)));
    }

    #[test]
    fn test_reduced_motion_drops_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_shake_intensity(15.0), 0.0);
        assert!(!settings.allows(&GameEvent::shake(0.7, 15.0)));
        assert!(settings.allows(&GameEvent::DecoyExpired));
    }

    #[test]
    fn test_muted_sound() {
        let settings = Settings {
            sound: false,
            ..Default::default()
        };
        assert_eq!(settings.volume_for(SoundKind::Collect), 0.0);
        assert!(!settings.allows(&GameEvent::PlaySound(SoundKind::AmbientLoop)));
    }

    #[test]
    fn test_volume_mix() {
        let settings = Settings::default();
        assert!((settings.volume_for(SoundKind::Impact) - 0.8).abs() < 1e-6);
        assert!((settings.volume_for(SoundKind::AmbientLoop) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_volume_rejected() {
        let settings: Settings = serde_json::from_str(r#"{ "sfx_volume": 1.5 }"#).unwrap();
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }
}
