use anyhow::{bail, Context, Result};
use clap::Parser;
use glam::Vec3;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use garment_previewer::cli::Cli;
use garment_previewer::core::{
    CameraAnimator, FixedStepFrames, FrameInfo, FrameIterator, ManualClock, TransitionHandle,
    TransitionStatus, DEFAULT_FIT_RATIO,
};
use garment_previewer::garment::Garment;
use garment_previewer::loaders::load_garment;
use garment_previewer::presets::PresetTable;
use garment_previewer::store::ShirtStore;
use garment_previewer::swatches::display_name;
use garment_previewer::text::{format_number, truncate_to_words, DEFAULT_WORD_LIMIT};
use garment_previewer::traits::{CameraRig, OrbitTarget};
use garment_previewer::viewer::ViewerConfig;

// === Constants ===

const GLTF_FILE_VAR: &str = "GLTF_FILE";
/// Frames allowed beyond the nominal transition length before giving up
const FRAME_SLACK: u64 = 8;

/// Garment path from the CLI, then the environment
fn model_path(cli: &Cli) -> Option<PathBuf> {
    cli.gltf
        .clone()
        .or_else(|| std::env::var(GLTF_FILE_VAR).ok().map(PathBuf::from))
}

fn print_frame<C: CameraRig, O: OrbitTarget>(
    frame: &FrameInfo,
    animator: &CameraAnimator<'_, C, O>,
) {
    let position = animator.camera().position();
    let target = animator.controls().map(|c| c.target()).unwrap_or_default();
    println!(
        "  frame {:>4} t={:>8.1}ms camera=({:.3}, {:.3}, {:.3}) target=({:.3}, {:.3}, {:.3})",
        frame.number, frame.time_ms, position.x, position.y, position.z, target.x, target.y, target.z
    );
}

/// One line summarizing a model switch
fn switch_report(model: &str, known: bool, frames: u64, position: Vec3) -> String {
    if known {
        format!(
            "Switched to {} in {} frames: camera=({:.3}, {:.3}, {:.3})",
            model, frames, position.x, position.y, position.z
        )
    } else {
        format!("Unknown model {}, camera left in place", model)
    }
}

/// Tick `animator` once per frame until `handle` settles
fn run_transition<C, O, I>(
    animator: &mut CameraAnimator<'_, C, O>,
    frames: &mut I,
    mut handle: TransitionHandle,
    frame_budget: u64,
    pacing: Option<Duration>,
    trace: bool,
) -> Result<u64>
where
    C: CameraRig,
    O: OrbitTarget,
    I: Iterator<Item = FrameInfo> + ?Sized,
{
    let mut used = 0;

    while handle.status() == TransitionStatus::Running {
        if used >= frame_budget {
            animator.cancel();
            bail!("Camera transition did not settle within {} frames", frame_budget);
        }
        if let Some(pause) = pacing {
            std::thread::sleep(pause);
        }

        let Some(frame) = frames.next() else {
            bail!("Frame source ended mid-transition");
        };
        animator.tick();
        used += 1;

        if trace {
            print_frame(&frame, animator);
        }
    }

    if handle.status() == TransitionStatus::Cancelled {
        log::warn!("Camera transition was cancelled");
    }
    Ok(used)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let ui = !cli.no_ui;

    let presets = match &cli.presets {
        Some(path) => PresetTable::load(path)?,
        None => PresetTable::builtin().clone(),
    };
    let preset = presets
        .get(&cli.model)
        .with_context(|| format!("Unknown model preset: {}", cli.model))?;

    let viewer = ViewerConfig::default();

    let garment = match model_path(&cli) {
        Some(path) => Some(Rc::new(RefCell::new(load_garment(&path)?))),
        None => None,
    };

    if let (Some(garment), true) = (&garment, ui) {
        let garment = garment.borrow();
        let names: Vec<&str> = garment
            .meshes
            .iter()
            .filter_map(|m| m.name.as_deref())
            .collect();
        println!(
            "Garment: {} meshes, {} vertices [{}]",
            garment.meshes.len(),
            format_number(garment.vertex_count() as f64),
            truncate_to_words(&names.join(" "), DEFAULT_WORD_LIMIT)
        );
    }

    // Appearance follows the store
    let mut store = ShirtStore::new();
    if let Some(garment) = &garment {
        let garment: Rc<RefCell<Garment>> = Rc::clone(garment);
        store.subscribe(move |state| {
            if let Err(e) = garment.borrow_mut().apply_appearance(state) {
                log::warn!("{:#}", e);
            }
        });
    }
    if ui {
        store.subscribe(|state| match &state.logo_data_url {
            Some(_) => println!("Appearance: logo texture"),
            None => println!("Appearance: {}", display_name(&state.color)),
        });
    }
    if let Some(color) = &cli.color {
        store.set_color(color.as_str());
    }
    if let Some(logo) = &cli.logo {
        store.set_logo(Some(logo.clone()));
    }

    let (mut camera, mut controls) = viewer.build_rig(preset);

    {
        let clock = ManualClock::new();
        let mut frames: Box<dyn Iterator<Item = FrameInfo>> = if cli.realtime {
            Box::new(FrameIterator::new())
        } else {
            Box::new(FixedStepFrames::new(clock.clone(), cli.fps))
        };
        let pacing = cli
            .realtime
            .then(|| Duration::from_secs_f64(1.0 / cli.fps.max(1.0)));

        let animator = CameraAnimator::new(
            &mut camera,
            Some(&mut controls),
            viewer.initial_duration_ms,
        )
        .with_presets(&presets);
        let mut animator = if cli.realtime {
            animator
        } else {
            animator.with_clock(clock)
        };

        animator.normalize_for_model(&cli.model, true);
        animator.update_controls_limits(&cli.model);
        animator.set_duration_ms(cli.duration_ms);

        let frame_budget = (cli.duration_ms * cli.fps / 1000.0).ceil().max(0.0) as u64 + FRAME_SLACK;
        let mut current = cli.model.as_str();

        for model in &cli.switches {
            let handle = animator.normalize_for_model(model, false);
            animator.update_controls_limits(model);
            let used = run_transition(
                &mut animator,
                frames.as_mut(),
                handle,
                frame_budget,
                pacing,
                ui && cli.trace_frames,
            )?;

            let known = presets.contains(model);
            if known {
                current = model.as_str();
            }
            if ui {
                println!(
                    "{}",
                    switch_report(model, known, used, animator.camera().position())
                );
            }
        }

        if cli.fit {
            match (&garment, presets.get(current)) {
                (Some(garment), Some(current_preset)) => {
                    let garment = garment.borrow();
                    let placed = garment.placed(current_preset);
                    let handle = animator.fit_camera_to_object(&placed, DEFAULT_FIT_RATIO, false);
                    let used = run_transition(
                        &mut animator,
                        frames.as_mut(),
                        handle,
                        frame_budget,
                        pacing,
                        ui && cli.trace_frames,
                    )?;
                    if ui {
                        println!("Fitted camera to garment in {} frames", used);
                    }
                }
                (None, _) => log::warn!("--fit needs a garment; pass --gltf or set {}", GLTF_FILE_VAR),
                (_, None) => log::warn!("No preset for {}, skipping fit", current),
            }
        }
    }

    if ui {
        println!(
            "Final camera=({:.3}, {:.3}, {:.3}) target=({:.3}, {:.3}, {:.3}) distance {:.2}..{:.2}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            controls.target.x,
            controls.target.y,
            controls.target.z,
            controls.min_distance,
            controls.max_distance
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_report_for_known_model() {
        let report = switch_report("shirt2", true, 48, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(
            report,
            "Switched to shirt2 in 48 frames: camera=(0.000, 0.000, 3.000)"
        );
    }

    #[test]
    fn test_switch_report_for_unknown_model() {
        let report = switch_report("hoodie", false, 0, Vec3::new(0.0, 0.0, 4.5));
        assert_eq!(report, "Unknown model hoodie, camera left in place");
        assert!(!report.contains("Switched"));
    }
}
