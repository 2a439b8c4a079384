//! Static asset catalogs: playable animals and obstacle types
//!
//! Immutable lookup tables. Source identifiers are the paths the browser
//! layer loads; the engine only carries them through to the view.

use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// Playable avatars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Animal {
    Fox,
    Deer,
    Boar,
    Hare,
}

/// Sprite sheet metadata for an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimalSprites {
    pub idle: &'static str,
    pub walk: &'static str,
    pub run: &'static str,
    /// Frames per row
    pub frame_count: u32,
    /// Square frame edge in pixels
    pub frame_size: u32,
}

impl Animal {
    pub const ALL: [Animal; 4] = [Animal::Fox, Animal::Deer, Animal::Boar, Animal::Hare];

    pub fn as_str(&self) -> &'static str {
        match self {
            Animal::Fox => "Fox",
            Animal::Deer => "Deer",
            Animal::Boar => "Boar",
            Animal::Hare => "Hare",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "fox" => Some(Animal::Fox),
            "deer" => Some(Animal::Deer),
            "boar" => Some(Animal::Boar),
            "hare" => Some(Animal::Hare),
            _ => None,
        }
    }

    pub fn sprites(&self) -> AnimalSprites {
        match self {
            Animal::Fox => AnimalSprites {
                idle: "assets/animals/Fox/Fox_Idle.png",
                walk: "assets/animals/Fox/Fox_walk.png",
                run: "assets/animals/Fox/Fox_Run.png",
                frame_count: 4,
                frame_size: 48,
            },
            Animal::Deer => AnimalSprites {
                idle: "assets/animals/Deer/Deer_Idle.png",
                walk: "assets/animals/Deer/Deer_Walk.png",
                run: "assets/animals/Deer/Deer_Run.png",
                frame_count: 4,
                frame_size: 48,
            },
            Animal::Boar => AnimalSprites {
                idle: "assets/animals/Boar/Boar_Idle.png",
                walk: "assets/animals/Boar/Boar_Walk.png",
                run: "assets/animals/Boar/Boar_Run.png",
                frame_count: 4,
                frame_size: 48,
            },
            Animal::Hare => AnimalSprites {
                idle: "assets/animals/Hare/Hare_Idle.png",
                walk: "assets/animals/Hare/Hare_Walk.png",
                run: "assets/animals/Hare/Hare_Run.png",
                frame_count: 4,
                frame_size: 48,
            },
        }
    }
}

/// Which way the avatar faces (sprite sheet row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

impl Facing {
    pub fn sprite_row(&self) -> u32 {
        match self {
            Facing::Down => 0,
            Facing::Left => 1,
            Facing::Right => 2,
            Facing::Up => 3,
        }
    }
}

/// A placeable obstacle sprite with its collidable footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleType {
    pub source: &'static str,
    pub width: f32,
    pub height: f32,
    /// Collidable sub-rectangle, relative to the sprite's top-left
    pub hitbox: Rect,
}

const BUSH_HITBOX: Rect = Rect::new(4.0, 8.0, 24.0, 20.0);
const TREE_HITBOX: Rect = Rect::new(16.0, 50.0, 32.0, 26.0);

const fn bush(source: &'static str) -> ObstacleType {
    ObstacleType {
        source,
        width: 32.0,
        height: 32.0,
        hitbox: BUSH_HITBOX,
    }
}

const fn tree(source: &'static str) -> ObstacleType {
    ObstacleType {
        source,
        width: 64.0,
        height: 80.0,
        hitbox: TREE_HITBOX,
    }
}

/// Snow-covered scenery scattered each level
pub const OBSTACLE_TYPES: [ObstacleType; 8] = [
    bush("assets/bushes/Snow_bush1.png"),
    bush("assets/bushes/Snow_bush2.png"),
    bush("assets/bushes/Snow_bush3.png"),
    tree("assets/trees/Snow_tree1.png"),
    tree("assets/trees/Snow_tree2.png"),
    tree("assets/trees/Snow_tree3.png"),
    tree("assets/trees/Snow_christmass_tree1.png"),
    tree("assets/trees/Snow_christmass_tree2.png"),
];

/// The ruins always sit in the middle of the arena
pub const RUINS: ObstacleType = ObstacleType {
    source: "assets/ruins/Snow_ruins1.png",
    width: 128.0,
    height: 96.0,
    hitbox: Rect::new(10.0, 40.0, 108.0, 50.0),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animal_lookup() {
        for animal in Animal::ALL {
            assert_eq!(Animal::from_name(animal.as_str()), Some(animal));
            assert_eq!(animal.sprites().frame_count, 4);
        }
        assert_eq!(Animal::from_name("FOX"), Some(Animal::Fox));
        assert_eq!(Animal::from_name("wolf"), None);
    }

    #[test]
    fn test_hitboxes_fit_inside_sprites() {
        for t in OBSTACLE_TYPES.iter().chain(std::iter::once(&RUINS)) {
            assert!(t.hitbox.x >= 0.0 && t.hitbox.right() <= t.width, "{}", t.source);
            assert!(t.hitbox.y >= 0.0 && t.hitbox.bottom() <= t.height, "{}", t.source);
        }
    }

    #[test]
    fn test_sprite_rows() {
        assert_eq!(Facing::Down.sprite_row(), 0);
        assert_eq!(Facing::Up.sprite_row(), 3);
    }
}
