//! # Studio Engine
//!
//! Keyframe animation and cloth preview core for a 3D scene editor.
//!
//! ## Features
//!
//! - **Timeline**: looped keyframe interpolation with wrap-around between the last and first keyframe
//! - **Cloth**: particle grid and structural constraint generation for soft-body previews
//! - **Colliders**: simplified collision proxies derived from arbitrary scene geometry
//! - **Physics bridge**: solver-agnostic interface with a Rapier backend and a deterministic stub
//!
//! ## Architecture Design
//!
//! The crate follows the **Anemic Domain Model (贫血模型)** pattern:
//! - **State (Resource)**: `TimelineState`, `KeyframeStore`, `EditorSession`
//! - **Service**: `AnimationService`, `ClothTopologyBuilder`, `ColliderProxyBuilder`, `ClothSyncer`
//! - **System**: ECS systems in [`editor::systems`] drive the per-frame tick
//!
//! The scene graph and the numerical solver are external collaborators consumed through
//! [`scene::SceneAccess`] and [`physics::SimulationBridge`].
//!
//! ### Example
//!
//! ```rust
//! use studio_engine::config::EditorConfig;
//! use studio_engine::editor::EditorSession;
//! use studio_engine::physics::DeterministicBridge;
//! use studio_engine::scene::SceneStore;
//!
//! let mut session = EditorSession::new(&EditorConfig::default()).unwrap();
//! let mut scene = SceneStore::new();
//! let mut bridge = DeterministicBridge::default();
//!
//! session.create_default_cloth(&mut scene, &mut bridge).unwrap();
//! session.toggle_physics();
//! session.tick(0.0, &mut scene, &mut bridge);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: errors, logging and helper macros
//! - [`config`]: configuration loading
//! - [`animation`]: keyframes, interpolation and playback
//! - [`scene`]: scene collaborator interface
//! - [`physics`]: solver bridge
//! - [`cloth`]: cloth topology, colliders and sync
//! - [`editor`]: session context and ECS systems

/// Errors, logging and helper macros
pub mod core;
/// Configuration system
pub mod config;
/// Animation system with keyframes
pub mod animation;
/// Scene collaborator interface
pub mod scene;
/// Solver bridge and Rapier backend
pub mod physics;
/// Cloth topology, collider proxies and solver sync
pub mod cloth;
/// Editor session and per-frame systems
pub mod editor;
