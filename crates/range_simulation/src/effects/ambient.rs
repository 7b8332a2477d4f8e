//! Ambient audio - фоновая музыка + шум, запускаются один раз при старте

use bevy::prelude::*;

use crate::bridge::{Bridge, CueId, CuePlayback};
use crate::config::RangeConfig;

/// Startup: зацикленные ambient cues (громкость из конфига)
pub fn start_ambient_cues(config: Res<RangeConfig>, mut bridge: ResMut<Bridge>) {
    let audio = &config.audio;

    bridge
        .audio
        .play_cue(CueId::BackgroundMusic, CuePlayback::looped(audio.music_volume));
    bridge
        .audio
        .play_cue(CueId::BackgroundNoise, CuePlayback::looped(audio.noise_volume));

    crate::logger::log("🎵 Ambient loops started");
}
