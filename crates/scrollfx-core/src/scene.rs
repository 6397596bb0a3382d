//! Scene-graph property set written into the 3D renderer every frame.
//!
//! [`SceneProps::compose`] combines the progress-driven [`SceneState`], the
//! smoothed camera and the idle clock. The packed form is a flat `f32`
//! block handed to JavaScript as a `Float32Array`.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::camera::CameraTarget;
use crate::constants::*;
use crate::piecewise::sanitize_progress;
use crate::timeline::SceneState;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PeelLeaf {
    pub position: Vec3,
    pub rotation: Vec3,
    /// `max(0, peel - 0.2·i)·2`, the per-leaf opening amount.
    pub open: f32,
}

impl PeelLeaf {
    pub fn at(index: usize, peel_amount: f32) -> Self {
        let angle = index as f32 / PEEL_LEAVES as f32 * TAU;
        let open = (peel_amount - index as f32 * 0.2).max(0.0) * 2.0;
        let reach = 0.3 + open * 0.3;
        Self {
            position: Vec3::new(angle.sin() * reach, -0.5 - open * 0.5, angle.cos() * reach),
            rotation: Vec3::new(open * 0.8, angle, open * 0.5),
            open,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneProps {
    pub object_position_y: f32,
    pub object_rotation_z: f32,
    pub object_scale: f32,
    /// Material distortion strength.
    pub distortion: f32,
    pub peel_amount: f32,
    pub bite_amount: f32,
    pub peel_leaves: [PeelLeaf; PEEL_LEAVES],
    pub camera: CameraTarget,
    pub mini_opacity: f32,
    pub mini_spin: f32,
    pub particle_offset_y: f32,
    pub particle_opacity: f32,
    pub particle_spin: f32,
}

impl SceneProps {
    pub fn compose(state: &SceneState, camera: CameraTarget, progress: f32, elapsed: f32) -> Self {
        let p = sanitize_progress(progress);
        let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };
        let bob = (elapsed * IDLE_BOB_RATE).sin() * IDLE_BOB_AMPLITUDE;
        let roll = (elapsed * IDLE_ROLL_RATE).sin() * IDLE_ROLL_AMPLITUDE;
        let mut peel_leaves = [PeelLeaf::default(); PEEL_LEAVES];
        for (i, leaf) in peel_leaves.iter_mut().enumerate() {
            *leaf = PeelLeaf::at(i, state.peel_amount);
        }
        let mini_opacity = if p > MINI_OBJECTS_THRESHOLD {
            ((p - MINI_OBJECTS_THRESHOLD) / 0.1).min(1.0)
        } else {
            0.0
        };
        Self {
            object_position_y: state.position_y + bob,
            object_rotation_z: state.rotation_z + roll,
            object_scale: state.scale,
            distortion: 0.1 + state.peel_amount * 0.1,
            peel_amount: state.peel_amount,
            bite_amount: state.bite_amount,
            peel_leaves,
            camera,
            mini_opacity,
            mini_spin: elapsed * 0.1,
            particle_offset_y: -p * PARTICLE_DRIFT,
            particle_opacity: 0.4 + p * 0.3,
            particle_spin: elapsed * 0.02,
        }
    }

    pub fn pack(&self) -> ScenePropsPacked {
        let mut leaves = [[0.0; 8]; PEEL_LEAVES];
        for (slot, leaf) in leaves.iter_mut().zip(&self.peel_leaves) {
            *slot = [
                leaf.position.x,
                leaf.position.y,
                leaf.position.z,
                leaf.open,
                leaf.rotation.x,
                leaf.rotation.y,
                leaf.rotation.z,
                0.0,
            ];
        }
        ScenePropsPacked {
            object: [
                self.object_position_y,
                self.object_rotation_z,
                self.object_scale,
                self.distortion,
            ],
            reveal: [self.peel_amount, self.bite_amount, 0.0, 0.0],
            camera: [self.camera.y, self.camera.z, 0.0, 0.0],
            leaves,
            extras: [
                self.mini_opacity,
                self.mini_spin,
                self.particle_offset_y,
                self.particle_opacity,
                self.particle_spin,
                0.0,
                0.0,
                0.0,
            ],
        }
    }
}

/// Fixed layout consumed by the JavaScript renderer:
/// `object = [y, rot_z, scale, distortion]`, `reveal = [peel, bite, _, _]`,
/// `camera = [y, z, _, _]`, each leaf `[px, py, pz, open, rx, ry, rz, _]`,
/// `extras = [mini_opacity, mini_spin, particle_y, particle_opacity, particle_spin, _, _, _]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScenePropsPacked {
    pub object: [f32; 4],
    pub reveal: [f32; 4],
    pub camera: [f32; 4],
    pub leaves: [[f32; 8]; PEEL_LEAVES],
    pub extras: [f32; 8],
}

impl ScenePropsPacked {
    pub const FLOATS: usize = std::mem::size_of::<Self>() / std::mem::size_of::<f32>();

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}
