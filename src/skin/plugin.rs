//! Skin plugin - applies colour keys and chosen skins to the tank body.

use bevy::prelude::*;
use std::path::Path;

use super::remap::{procedural_base_texture, remap_texture, PlayerColorKey};
use super::{SkinMenuLatch, SkinRegistry};
use crate::assets::{decode_image, fetch_bytes, AssetError, PixelBuffer};
use crate::core::{ApplySkin, ColorKeyLoaded, GameConfig};
use crate::player::TankBody;

/// Texture painted in the reference colours; every remap starts from it.
#[derive(Resource, Debug, Clone)]
pub struct BaseTankTexture(pub PixelBuffer);

/// Skin plugin - owns the skin list and the tank body texture.
pub struct SkinPlugin;

impl Plugin for SkinPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SkinRegistry>()
            .init_resource::<SkinMenuLatch>()
            .add_systems(PreStartup, load_base_texture)
            .add_systems(Update, (apply_color_key, apply_skin));
    }
}

/// Load the configured base texture, or paint the procedural one.
fn load_base_texture(mut commands: Commands, config: Res<GameConfig>) {
    let texture = match &config.base_texture {
        Some(path) => {
            let path = Path::new(path);
            match fetch_bytes(path).and_then(|bytes| decode_image(&bytes, path)) {
                Ok(texture) => {
                    info!("Loaded tank base texture {}", path.display());
                    texture
                }
                Err(e) => {
                    warn!("{}. Using procedural tank texture.", e);
                    procedural_base_texture()
                }
            }
        }
        None => procedural_base_texture(),
    };
    commands.insert_resource(BaseTankTexture(texture));
}

/// Recolour the tank from a freshly decoded colour key.
fn apply_color_key(
    mut events: EventReader<ColorKeyLoaded>,
    config: Res<GameConfig>,
    base: Res<BaseTankTexture>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    body_query: Query<&MeshMaterial3d<StandardMaterial>, With<TankBody>>,
) {
    for ColorKeyLoaded(key_image) in events.read() {
        match recolor(&base.0, key_image, &config) {
            Ok(texture) => {
                info!("Applied player colour key");
                paint_tank_body(&texture, &mut images, &mut materials, &body_query);
            }
            Err(e) => warn!("Ignoring player colour key: {}", e),
        }
    }
}

/// Recolour the tank from the chosen skin's palette.
fn apply_skin(
    mut events: EventReader<ApplySkin>,
    config: Res<GameConfig>,
    base: Res<BaseTankTexture>,
    skins: Res<SkinRegistry>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    body_query: Query<&MeshMaterial3d<StandardMaterial>, With<TankBody>>,
) {
    for ApplySkin { index } in events.read() {
        let Some(skin) = skins.get(*index) else {
            warn!("No skin at index {} ({} loaded)", index, skins.len());
            continue;
        };
        match recolor(&base.0, &skin.palette, &config) {
            Ok(texture) => {
                info!("Applied skin '{}'", skin.name);
                paint_tank_body(&texture, &mut images, &mut materials, &body_query);
            }
            Err(e) => warn!("Cannot apply skin '{}': {}", skin.name, e),
        }
    }
}

fn recolor(base: &PixelBuffer, palette: &PixelBuffer, config: &GameConfig) -> Result<PixelBuffer, AssetError> {
    let key = PlayerColorKey::sample(palette, config.primary_sample, config.secondary_sample)?;
    Ok(remap_texture(base, key))
}

/// Put a texture into the tank body's material slot.
fn paint_tank_body(
    texture: &PixelBuffer,
    images: &mut Assets<Image>,
    materials: &mut Assets<StandardMaterial>,
    body_query: &Query<&MeshMaterial3d<StandardMaterial>, With<TankBody>>,
) {
    let image = images.add(texture.to_image());
    for material in body_query.iter() {
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = Color::WHITE;
            material.base_color_texture = Some(image.clone());
        }
    }
}
