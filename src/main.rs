//! Wavescape - audio-reactive terrain, rendered offline
//!
//! Plays a WAV file (or a synthetic pulse) through the frequency analyser
//! and the landscape, writing top-down PNG snapshots along the way.

use std::time::Instant;

use clap::Parser;
use glam::Vec3;
use log::info;

use wavescape::audio::{FrequencyAnalyser, WavTrack};
use wavescape::cli::Args;
use wavescape::clock::ManualClock;
use wavescape::params::AnalyserConfig;
use wavescape::rendering::{MeshBuffers, SnapshotRenderer};
use wavescape::visualizer::Visualizer;

const PULSE_SAMPLE_RATE: u32 = 44100;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.visualizer_config()?;
    let snapshots = args.snapshot_config()?;
    if snapshots.every_n_frames > 0 {
        std::fs::create_dir_all(&snapshots.output_dir)?;
    }

    // The analyser needs a power-of-two width; frames are conformed to the
    // landscape resolution afterwards
    let analyser_config = AnalyserConfig {
        buffer_width: config.landscape.resolution.next_power_of_two().max(16),
        ..AnalyserConfig::default()
    };
    let mut analyser = FrequencyAnalyser::new(analyser_config)?;
    let fft_size = analyser.config().fft_size();

    let track = match &args.wav {
        Some(path) => WavTrack::open(path)?,
        None => {
            info!("No WAV given; using a {} BPM pulse", args.bpm);
            WavTrack::pulse(PULSE_SAMPLE_RATE, snapshots.duration_secs, args.bpm)
        }
    };

    let mesh_origin = Vec3::new(config.landscape.mesh_x, 0.0, config.landscape.mesh_z);
    let clock = ManualClock::new();
    let mut visualizer = Visualizer::new(config, Box::new(clock.clone()))?;
    let mut renderer = SnapshotRenderer::new(snapshots.pixel_scale, mesh_origin);
    let mut buffers = MeshBuffers::from_grid(visualizer.grid());

    let started = Instant::now();
    let total_frames = snapshots.total_frames();
    // Topology never changes, so indices are uploaded once
    let mut uploaded_bytes = buffers.index_bytes().len();
    let mut audio_frames = 0usize;
    let mut written = 0usize;

    visualizer.start_audio();
    for frame_num in 0..total_frames {
        clock.advance(snapshots.frame_interval() as f64);

        // One analysed frame per display frame while the track lasts
        let window = track.window_ending_at(visualizer.elapsed() as f64, fft_size);
        if !window.is_empty() {
            let bins = analyser.analyse(window);
            if visualizer.on_audio_frame(&bins).is_some() {
                audio_frames += 1;
            }
        }
        visualizer.tick();

        renderer.apply_events(visualizer.drain_events());
        let update = visualizer.take_mesh_update();
        uploaded_bytes += buffers.apply(visualizer.grid(), update);

        if snapshots.wants_snapshot(frame_num) {
            let image = renderer.render(visualizer.grid(), visualizer.details(), visualizer.birds());
            renderer.save(&image, snapshots.frame_path(frame_num))?;
            written += 1;
        }
    }

    let (min_fps, avg_fps, max_fps) = visualizer.fps().stats();
    info!(
        "Simulated {} frames ({} with audio) in {:.2}s",
        total_frames,
        audio_frames,
        started.elapsed().as_secs_f32()
    );
    info!(
        "Simulated FPS - Min: {:.1}, Avg: {:.1}, Max: {:.1}",
        min_fps, avg_fps, max_fps
    );
    info!(
        "{} snapshot(s), {} live object(s), {:.1} MiB of mesh uploads",
        written,
        renderer.live_objects(),
        uploaded_bytes as f64 / (1024.0 * 1024.0)
    );

    Ok(())
}
