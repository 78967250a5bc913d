//! Asset pipeline plugin - dispatches fetches and routes their results.

use bevy::prelude::*;
use bevy::tasks::{block_on, IoTaskPool, Task};
use bevy_kira_audio::{Audio, AudioControl, AudioSource};
use std::collections::BTreeSet;
use std::path::Path;

use super::pipeline::{discover, interpret, resolve, scan_directory, AssetRecord, DecodedAsset, ResolvedAsset};
use crate::arena::{ArenaRegistry, AssetRole, BUILTIN_ARENA_NAME};
use crate::core::{BuildSkinMenu, ColorKeyLoaded, GameConfig, GameState, LevelCommand, PortraitLoaded};
use crate::skin::{SkinMenuLatch, SkinRegistry};

/// In-flight fetches for the current scene.
#[derive(Resource, Default)]
pub struct Acquisition {
    tasks: Vec<Task<ResolvedAsset>>,
    /// Discovery ordinals of arenas whose fetch has not finished.
    pending_arenas: BTreeSet<usize>,
    dispatched: bool,
    first_arena_checked: bool,
}

impl Acquisition {
    /// Start resolving one record on the IO task pool.
    fn dispatch(&mut self, record: AssetRecord) {
        if record.role == AssetRole::Arena {
            self.pending_arenas.insert(record.ordinal);
        }
        let task = IoTaskPool::get().spawn(async move { resolve(record) });
        self.tasks.push(task);
    }

    /// Number of fetches still running.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the first arena in discovery order is known.
    ///
    /// With an arena already decoded, only arenas discovered before it must
    /// settle. With none decoded, every arena must.
    pub fn first_arena_known(&self, arenas: &ArenaRegistry) -> bool {
        if !self.dispatched {
            return false;
        }
        match (arenas.get(0), self.pending_arenas.first()) {
            (Some(first), Some(&pending)) => pending > first.level_index,
            (_, None) => true,
            (None, Some(_)) => false,
        }
    }
}

/// Real-time delay before the loading screen is dismissed.
#[derive(Resource)]
pub struct LoadingGrace(pub Timer);

/// Asset pipeline plugin - scans the streaming directory on every scene load.
pub struct AssetPipelinePlugin;

impl Plugin for AssetPipelinePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Acquisition>()
            .init_resource::<ArenaRegistry>()
            .add_event::<ResolvedAsset>()
            .add_systems(OnEnter(GameState::Loading), begin_acquisition)
            .add_systems(
                Update,
                (poll_acquisition, route_resolved_assets, load_first_arena).chain(),
            )
            .add_systems(
                Update,
                dismiss_loading_screen
                    .run_if(in_state(GameState::Loading))
                    .run_if(resource_exists::<LoadingGrace>),
            );
    }
}

/// Freeze the clock, forget the previous scene's assets and dispatch a fresh scan.
#[allow(clippy::too_many_arguments)]
fn begin_acquisition(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut acquisition: ResMut<Acquisition>,
    mut arenas: ResMut<ArenaRegistry>,
    mut skins: ResMut<SkinRegistry>,
    mut latch: ResMut<SkinMenuLatch>,
    mut time: ResMut<Time<Virtual>>,
    audio: Res<Audio>,
) {
    time.pause();
    audio.stop();

    // Dropping the old tasks cancels them
    *acquisition = Acquisition::default();
    arenas.clear();
    skins.clear();
    latch.0 = false;

    commands.insert_resource(LoadingGrace(Timer::new(
        config.grace_delay(),
        TimerMode::Once,
    )));

    let dir = Path::new(&config.streaming_dir);
    info!("Streaming assets path: {}", dir.display());

    match scan_directory(dir) {
        Ok(paths) => {
            let records = discover(&paths);
            info!("Dispatching {} asset(s) from {} file(s)", records.len(), paths.len());
            for record in records {
                acquisition.dispatch(record);
            }
        }
        Err(e) => warn!("{}", e),
    }

    acquisition.dispatched = true;
}

/// Collect finished fetches and post them as events.
fn poll_acquisition(mut acquisition: ResMut<Acquisition>, mut resolved: EventWriter<ResolvedAsset>) {
    let Acquisition {
        tasks,
        pending_arenas,
        ..
    } = &mut *acquisition;

    tasks.retain_mut(|task| {
        if !task.is_finished() {
            return true;
        }
        let result = block_on(task);
        if result.record.role == AssetRole::Arena {
            pending_arenas.remove(&result.record.ordinal);
        }
        resolved.send(result);
        false
    });
}

/// Hand each resolved asset to its owner. One asset is applied completely before the next.
#[allow(clippy::too_many_arguments)]
fn route_resolved_assets(
    mut resolved: ResMut<Events<ResolvedAsset>>,
    mut arenas: ResMut<ArenaRegistry>,
    mut skins: ResMut<SkinRegistry>,
    mut images: ResMut<Assets<Image>>,
    mut portraits: EventWriter<PortraitLoaded>,
    mut color_keys: EventWriter<ColorKeyLoaded>,
    audio: Res<Audio>,
    mut audio_sources: ResMut<Assets<AudioSource>>,
) {
    for asset in resolved.drain() {
        let name = asset.record.raw_name.clone();
        match interpret(asset) {
            Ok(DecodedAsset::Arena(arena)) => {
                info!("Loaded arena '{}' from {}", arena.level_name, name);
                arenas.insert(arena);
            }
            Ok(DecodedAsset::Skin(skin)) => {
                info!("Loaded skin '{}' from {}", skin.name, name);
                skins.insert(skin);
            }
            Ok(DecodedAsset::Portrait { display_name, image }) => {
                info!("Loaded player portrait for '{}'", display_name.trim_end());
                portraits.send(PortraitLoaded {
                    display_name,
                    image: images.add(image.to_image()),
                });
            }
            Ok(DecodedAsset::ColorKey(image)) => {
                color_keys.send(ColorKeyLoaded(image));
            }
            Ok(DecodedAsset::Music(clip)) => {
                info!("Playing soundtrack {}", name);
                audio.play(audio_sources.add(clip.into_source())).looped();
            }
            Err(e) => warn!("Skipping {}: {}", name, e),
        }
    }
}

/// Once the first discovered arena is known, replace the built-in arena with it.
fn load_first_arena(
    mut acquisition: ResMut<Acquisition>,
    arenas: Res<ArenaRegistry>,
    mut level_commands: EventWriter<LevelCommand>,
) {
    if acquisition.first_arena_checked || !acquisition.first_arena_known(&arenas) {
        return;
    }
    acquisition.first_arena_checked = true;

    if arenas.is_empty() {
        info!("No arenas found, keeping {}", BUILTIN_ARENA_NAME);
    } else {
        info!("{} arena(s) available", arenas.len());
        level_commands.send(LevelCommand::LoadFirstArena);
    }
}

/// Dismiss the loading screen after the grace delay, whether or not fetches are done.
fn dismiss_loading_screen(
    real_time: Res<Time<Real>>,
    mut grace: ResMut<LoadingGrace>,
    mut latch: ResMut<SkinMenuLatch>,
    mut build_menu: EventWriter<BuildSkinMenu>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    grace.0.tick(real_time.delta());
    if !grace.0.just_finished() {
        return;
    }

    next_state.set(GameState::Running);

    if !latch.0 {
        latch.0 = true;
        build_menu.send(BuildSkinMenu);
    }
}
