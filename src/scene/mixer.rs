use nalgebra_glm as glm;

use super::scene::{ChannelValues, Scene};
use crate::gltf::TargetPath;

/// Plays at most one animation clip at a time, the way the scroll
/// sections drive the model: entering a section stops whatever is
/// playing and starts that section's clip from the beginning.
#[derive(Debug, Default)]
pub struct Mixer {
    active: Option<usize>,
    time: f32,
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Stop everything and play the named clip from its start. Returns
    /// false (and stops nothing) when the clip does not exist.
    pub fn play(&mut self, scene: &Scene, name: &str) -> bool {
        match scene.clip_index(name) {
            Some(index) => {
                self.active = Some(index);
                self.time = 0.0;
                true
            }
            None => {
                log::warn!("animation clip '{name}' not found in model");
                false
            }
        }
    }

    #[allow(dead_code)]
    pub fn stop_all(&mut self) {
        self.active = None;
        self.time = 0.0;
    }

    /// Advance the active clip and write the sampled TRS onto the scene's
    /// nodes. Returns true when node transforms changed.
    pub fn advance(&mut self, scene: &mut Scene, dt: f32) -> bool {
        let Some(index) = self.active else {
            return false;
        };
        let Some(clip) = scene.clips.get(index) else {
            self.active = None;
            return false;
        };
        if clip.duration <= 0.0 {
            return false;
        }
        self.time = (self.time + dt.max(0.0)) % clip.duration;
        let time = self.time;

        // Sample first: channels borrow the clip, node writes need &mut.
        let mut updates: Vec<(usize, TargetPath, glm::Vec3, glm::Quat)> = Vec::new();
        for channel in &clip.channels {
            match (&channel.values, channel.path) {
                (ChannelValues::Vec3(values), path) => {
                    let v = sample_vec3(&channel.times, values, time);
                    updates.push((channel.node, path, v, glm::Quat::identity()));
                }
                (ChannelValues::Quat(values), path) => {
                    let q = sample_quat(&channel.times, values, time);
                    updates.push((channel.node, path, glm::Vec3::zeros(), q));
                }
            }
        }
        for (node, path, v, q) in updates {
            let Some(node) = scene.nodes.get_mut(node) else {
                continue;
            };
            match path {
                TargetPath::Translation => node.translation = v,
                TargetPath::Scale => node.scale = v,
                TargetPath::Rotation => node.rotation = q,
                TargetPath::Weights => {}
            }
        }
        scene.compute_global_transforms();
        true
    }
}

/// Index of the keyframe at or before `time`, and the lerp factor to the
/// next one. Clamps outside the keyframe range.
fn keyframe_span(times: &[f32], time: f32) -> (usize, usize, f32) {
    if times.is_empty() {
        return (0, 0, 0.0);
    }
    if time <= times[0] {
        return (0, 0, 0.0);
    }
    if time >= times[times.len() - 1] {
        let last = times.len() - 1;
        return (last, last, 0.0);
    }
    let next = times.partition_point(|t| *t <= time);
    let prev = next - 1;
    let span = times[next] - times[prev];
    let t = if span > 0.0 {
        (time - times[prev]) / span
    } else {
        0.0
    };
    (prev, next, t)
}

fn sample_vec3(times: &[f32], values: &[[f32; 3]], time: f32) -> glm::Vec3 {
    let (a, b, t) = keyframe_span(times, time);
    match (values.get(a), values.get(b)) {
        (Some(va), Some(vb)) => glm::lerp(&glm::Vec3::from(*va), &glm::Vec3::from(*vb), t),
        (Some(va), None) => glm::Vec3::from(*va),
        _ => glm::Vec3::zeros(),
    }
}

fn sample_quat(times: &[f32], values: &[[f32; 4]], time: f32) -> glm::Quat {
    let (a, b, t) = keyframe_span(times, time);
    let quat = |v: &[f32; 4]| glm::quat(v[0], v[1], v[2], v[3]);
    match (values.get(a), values.get(b)) {
        (Some(va), Some(vb)) => glm::quat_normalize(&glm::quat_slerp(&quat(va), &quat(vb), t)),
        (Some(va), None) => glm::quat_normalize(&quat(va)),
        _ => glm::Quat::identity(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::scene::{Channel, Clip};
    use super::*;
    use crate::gltf::Document;

    fn scene_with_clip() -> Scene {
        let doc = Document::from_json(br#"{"nodes": [{}]}"#).unwrap();
        let mut scene = Scene::from_document(&doc, &[]).unwrap();
        scene.clips.push(Clip {
            name: "Free_Fall".to_string(),
            duration: 2.0,
            channels: vec![Channel {
                node: 0,
                path: TargetPath::Translation,
                times: vec![0.0, 2.0],
                values: ChannelValues::Vec3(vec![[0.0, 0.0, 0.0], [0.0, -4.0, 0.0]]),
            }],
        });
        scene.clips.push(Clip {
            name: "Sitting".to_string(),
            duration: 1.0,
            channels: Vec::new(),
        });
        scene
    }

    #[test]
    fn play_selects_one_clip_and_restarts() {
        let scene = scene_with_clip();
        let mut mixer = Mixer::new();
        assert!(mixer.play(&scene, "Sitting"));
        assert_eq!(mixer.active(), Some(1));
        assert!(mixer.play(&scene, "Free_Fall"));
        assert_eq!(mixer.active(), Some(0));
        assert_eq!(mixer.time, 0.0);
    }

    #[test]
    fn unknown_clip_leaves_playback_untouched() {
        let scene = scene_with_clip();
        let mut mixer = Mixer::new();
        mixer.play(&scene, "Free_Fall");
        assert!(!mixer.play(&scene, "Moonwalk"));
        assert_eq!(mixer.active(), Some(0));
    }

    #[test]
    fn advance_writes_sampled_translation() {
        let mut scene = scene_with_clip();
        let mut mixer = Mixer::new();
        mixer.play(&scene, "Free_Fall");
        assert!(mixer.advance(&mut scene, 1.0));
        assert!((scene.nodes[0].translation.y + 2.0).abs() < 1e-4);
    }

    #[test]
    fn playback_loops_over_duration() {
        let mut scene = scene_with_clip();
        let mut mixer = Mixer::new();
        mixer.play(&scene, "Free_Fall");
        mixer.advance(&mut scene, 2.5);
        assert!((mixer.time - 0.5).abs() < 1e-4);
    }

    #[test]
    fn stopped_mixer_does_nothing() {
        let mut scene = scene_with_clip();
        let mut mixer = Mixer::new();
        assert!(!mixer.advance(&mut scene, 0.1));
        mixer.play(&scene, "Free_Fall");
        mixer.stop_all();
        assert!(!mixer.advance(&mut scene, 0.1));
        assert_eq!(scene.nodes[0].translation, glm::Vec3::zeros());
    }

    #[test]
    fn keyframe_span_clamps_and_interpolates() {
        let times = [0.0, 1.0, 3.0];
        assert_eq!(keyframe_span(&times, -1.0), (0, 0, 0.0));
        assert_eq!(keyframe_span(&times, 5.0), (2, 2, 0.0));
        let (a, b, t) = keyframe_span(&times, 2.0);
        assert_eq!((a, b), (1, 2));
        assert!((t - 0.5).abs() < 1e-6);
    }
}
