//! Debug-draw bridge resource.
//!
//! Overlay geometry is delivered to an external consumer (a renderer, a
//! logger, a test harness) over a channel. Sending is fire-and-forget: a
//! missing or disconnected consumer is ignored, so systems can emit overlay
//! commands unconditionally whenever
//! [`DebugMode`](crate::resources::debugmode::DebugMode) is present.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// One overlay drawing command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DebugDrawCmd {
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Rect { x: f64, y: f64, w: f64, h: f64 },
}

/// Sending half of the overlay channel, stored in the ECS world.
#[derive(Resource)]
pub struct DebugDrawBridge {
    tx: Sender<DebugDrawCmd>,
}

impl DebugDrawBridge {
    /// Create the bridge and the receiving half for the consumer.
    pub fn channel() -> (Self, Receiver<DebugDrawCmd>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }

    /// Send a command. A disconnected consumer is ignored.
    pub fn send(&self, cmd: DebugDrawCmd) {
        let _ = self.tx.send(cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_arrive_in_order() {
        let (bridge, rx) = DebugDrawBridge::channel();
        bridge.send(DebugDrawCmd::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        });
        bridge.send(DebugDrawCmd::Rect {
            x: 2.0,
            y: 2.0,
            w: 4.0,
            h: 4.0,
        });
        assert!(matches!(rx.recv().unwrap(), DebugDrawCmd::Line { .. }));
        assert!(matches!(rx.recv().unwrap(), DebugDrawCmd::Rect { .. }));
    }

    #[test]
    fn send_after_consumer_drop_is_ignored() {
        let (bridge, rx) = DebugDrawBridge::channel();
        drop(rx);
        bridge.send(DebugDrawCmd::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        });
    }
}
