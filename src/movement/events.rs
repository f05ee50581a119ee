//! Movement domain: locomotion messages for feedback and visuals.

use bevy::ecs::message::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementEvent {
    Jumped,
    DoubleJumped,
    Dashed,
    GlideStarted,
    GlideEnded,
    LedgeGrabbed,
    LedgeClimbed,
}

impl Message for MovementEvent {}
