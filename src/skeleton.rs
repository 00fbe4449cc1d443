//! Bone geometry
//!
//! A [`Bone`] is a rigid segment between a start node and an end node with a
//! fixed length and angle. Bones can be joined into a [`Skeleton`]: joining
//! snaps the second bone so that its chosen node sits on the first bone's
//! chosen node, and moving the skeleton moves every bone together.
//!
//! Only the geometry lives here. Nothing in the simulation animates or draws
//! skeletons yet.
//!
//! # Construction
//!
//! | Given                         | Result                              |
//! |-------------------------------|-------------------------------------|
//! | start + angle + length        | end computed from the angle         |
//! | start + end                   | angle and length computed           |
//! | end + angle + length (no start) | [`BoneError::InsufficientBoneData`] |
//! | anything less                 | [`BoneError::InsufficientBoneData`] |

use crate::error::BoneError;
use glam::Vec2;

/// Which end of a bone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoneNode {
    Start,
    End,
}

/// Partial description of a bone; see the module docs for what is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoneSpec {
    pub start: Option<Vec2>,
    pub end: Option<Vec2>,
    pub angle_degrees: Option<f32>,
    pub length: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    start: Vec2,
    end: Vec2,
    /// Radians, measured with y pointing down the screen
    angle: f32,
    length: f32,
}

impl Bone {
    pub fn from_spec(spec: BoneSpec) -> Result<Self, BoneError> {
        match spec {
            BoneSpec {
                start: Some(start),
                angle_degrees: Some(angle_degrees),
                length: Some(length),
                ..
            } => {
                let angle = angle_degrees.to_radians();
                Ok(Bone {
                    start,
                    end: start + Vec2::from_angle(angle) * length,
                    angle,
                    length,
                })
            }
            BoneSpec {
                start: Some(start),
                end: Some(end),
                ..
            } => Ok(Bone::between(start, end)),
            _ => Err(BoneError::InsufficientBoneData),
        }
    }

    /// Bone spanning two known nodes.
    pub fn between(start: Vec2, end: Vec2) -> Self {
        let offset = end - start;
        Bone {
            start,
            end,
            angle: offset.y.atan2(offset.x),
            length: offset.length(),
        }
    }

    pub fn node(&self, node: BoneNode) -> Vec2 {
        match node {
            BoneNode::Start => self.start,
            BoneNode::End => self.end,
        }
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle.to_degrees()
    }

    /// Moves both nodes by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    /// Moves the whole bone so that `node` lands on `position`.
    pub fn set_node(&mut self, node: BoneNode, position: Vec2) {
        let delta = position - self.node(node);
        self.translate(delta);
    }
}

/// A joint between two bones of a [`Skeleton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joint {
    pub anchor: usize,
    pub anchor_node: BoneNode,
    pub follower: usize,
    pub follower_node: BoneNode,
}

#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    bones: Vec<Bone>,
    joints: Vec<Joint>,
}

impl Skeleton {
    pub fn new() -> Self {
        Skeleton::default()
    }

    /// Adds a bone and returns its index.
    pub fn add_bone(&mut self, bone: Bone) -> usize {
        self.bones.push(bone);
        self.bones.len() - 1
    }

    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Joins two bones. The anchor keeps its position; the follower is moved
    /// so its node sits on the anchor's node.
    ///
    /// Returns `false` (and records nothing) if either index is out of range
    /// or both name the same bone.
    pub fn connect(
        &mut self,
        anchor: usize,
        anchor_node: BoneNode,
        follower: usize,
        follower_node: BoneNode,
    ) -> bool {
        if anchor == follower || anchor >= self.bones.len() || follower >= self.bones.len() {
            return false;
        }

        let position = self.bones[anchor].node(anchor_node);
        self.bones[follower].set_node(follower_node, position);
        self.joints.push(Joint {
            anchor,
            anchor_node,
            follower,
            follower_node,
        });
        true
    }

    pub fn translate(&mut self, delta: Vec2) {
        for bone in &mut self.bones {
            bone.translate(delta);
        }
    }
}
