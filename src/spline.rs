//! Camera motion preview: the engine's cubic B-spline interpolator,
//! reproduced from the reverse-engineered Debug ROM routines. The observable
//! output is matched quirk-for-quirk, including stopping one segment before
//! the final 4-point window.

use glam::{Quat, Vec3};

use crate::codec::{binang_to_rad, host_from_engine};
use crate::command::{ActorCue, CamPoint};

pub const DEFAULT_FOV: f32 = 45.0;

/// One interpolation key: paired eye/at positions in host space plus the
/// scalar channels carried on the eye point.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraKeyPoint {
    pub eye: Vec3,
    pub at: Vec3,
    pub roll: f32,
    pub fov: f32,
    pub frames: i32,
}

impl CameraKeyPoint {
    /// Builds a key from a paired eye/at point. The frame count, roll and
    /// view angle channels all ride on the eye point.
    pub fn from_cam_points(eye: &CamPoint, at: &CamPoint, scale: f32) -> Self {
        Self {
            eye: host_from_engine(eye.pos, scale),
            at: host_from_engine(at.pos, scale),
            roll: eye.cam_roll as f32,
            fov: eye.view_angle,
            frames: eye.frame as i32,
        }
    }
}

/// Interpolated camera channels before orientation is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub eye: Vec3,
    pub at: Vec3,
    pub roll: f32,
    pub fov: f32,
}

impl CameraState {
    /// The held state used whenever interpolation is not defined.
    pub fn undefined() -> Self {
        Self {
            eye: Vec3::ZERO,
            at: Vec3::new(0.0, 0.0, -1.0),
            roll: 0.0,
            fov: DEFAULT_FOV,
        }
    }
}

/// Full camera pose with orientation derived from the look vector.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub orientation: Quat,
    pub fov: f32,
}

impl CameraPose {
    pub fn undefined() -> Self {
        Self {
            eye: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            fov: DEFAULT_FOV,
        }
    }
}

/// Basis weights for ratio `t`, from the in-game implementation. This is a
/// uniform cubic B-spline, not Catmull-Rom, and the truncated decimal
/// constants are kept as-is.
pub fn spline_coeffs(t: f32) -> [f32; 4] {
    let t = t.min(1.0); // no check for t < 0
    let one_minus_t = 1.0 - t;
    let t_sq = t * t;
    let t_cube = t_sq * t;
    [
        (one_minus_t * one_minus_t * one_minus_t) / 6.0,
        (t_cube * 0.5) - t_sq + 0.6666667,
        (t_sq + t - t_cube) * 0.5 + 0.16666667,
        t_cube / 6.0,
    ]
}

/// Advances the (segment, ratio) state frame-by-frame from zero and blends
/// the active 4-point window.
pub fn evaluate(points: &[CameraKeyPoint], frame: i32) -> CameraState {
    let len = points.len();
    let mut p = 0usize;
    let mut t = 0.0f32;

    for _ in 0..frame.max(0) {
        if p + 2 >= len.saturating_sub(1) {
            return CameraState::undefined();
        }

        let inv = |frames: i32| if frames != 0 { 1.0 / frames as f32 } else { 0.0 };
        let denom1 = inv(points[p + 1].frames);
        let denom2 = inv(points[p + 2].frames);
        let dt = (t * (denom2 - denom1) + denom1).max(0.0);

        if t + dt >= 1.0 {
            // The game stops one segment before the last full window.
            if p + 3 == len - 1 {
                break;
            }
            t -= 1.0;
            p += 1;
        }
        t += dt;
    }

    if p + 3 > len.saturating_sub(1) {
        return CameraState::undefined();
    }

    let [s1, s2, s3, s4] = spline_coeffs(t);
    let window = &points[p..p + 4];
    let blend = |get: fn(&CameraKeyPoint) -> f32| {
        s1 * get(&window[0]) + s2 * get(&window[1]) + s3 * get(&window[2]) + s4 * get(&window[3])
    };
    CameraState {
        eye: s1 * window[0].eye + s2 * window[1].eye + s3 * window[2].eye + s4 * window[3].eye,
        at: s1 * window[0].at + s2 * window[1].at + s3 * window[2].at + s4 * window[3].at,
        roll: blend(|k| k.roll),
        fov: blend(|k| k.fov),
    }
}

/// Derives the orientation quaternion from a camera state: roll about
/// world-up, pitch from the look vector's angle to world-up, yaw from its
/// horizontal components, composed yaw * pitch * roll.
pub fn camera_pose(state: &CameraState) -> CameraPose {
    let look = state.at - state.eye;
    if look.length() < 1e-6 {
        return CameraPose::undefined();
    }
    let look = look.normalize();

    let qroll = Quat::from_axis_angle(Vec3::Z, state.roll * std::f32::consts::PI / 128.0);
    let qpitch = Quat::from_axis_angle(
        -Vec3::X,
        std::f32::consts::PI + look.dot(Vec3::Z).clamp(-1.0, 1.0).acos(),
    );
    let qyaw = Quat::from_axis_angle(-Vec3::Z, look.dot(Vec3::X).atan2(look.dot(Vec3::Y)));

    CameraPose {
        eye: state.eye,
        orientation: qyaw * qpitch * qroll,
        fov: state.fov,
    }
}

/// One continuous camera motion segment.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraShot {
    pub start_frame: i32,
    pub points: Vec<CameraKeyPoint>,
}

impl CameraShot {
    /// Pose at an absolute cutscene frame, or the undefined pose before the
    /// shot starts.
    pub fn state_at(&self, frame: i32) -> CameraState {
        let local = frame - (self.start_frame + 1);
        if local < 0 {
            return CameraState::undefined();
        }
        evaluate(&self.points, local)
    }
}

/// The shot active at `frame`: the one with the greatest start frame still
/// strictly below it.
pub fn select_shot(shots: &[CameraShot], frame: i32) -> Option<&CameraShot> {
    shots
        .iter()
        .filter(|shot| shot.start_frame < frame)
        .max_by_key(|shot| shot.start_frame)
}

fn cue_host_pos(pos: [i32; 3], scale: f32) -> Vec3 {
    Vec3::new(
        pos[0] as f32 / scale,
        -pos[2] as f32 / scale,
        pos[1] as f32 / scale,
    )
}

/// Linear actor position preview over a cue list (terminal cue included, it
/// supplies the final interval's end point). Returns host-space position and
/// Euler rotation in radians.
pub fn actor_cue_state(cues: &[ActorCue], frame: i32, scale: f32) -> (Vec3, Vec3) {
    let mut pos = Vec3::ZERO;
    let mut rot = Vec3::ZERO;

    if cues.len() >= 2 {
        for i in 0..cues.len() - 1 {
            let start = cues[i].start_frame as i32;
            let end = cues[i + 1].start_frame as i32;
            if end > start && frame > start {
                let here = cue_host_pos(cues[i].start_pos, scale);
                let next = cue_host_pos(cues[i + 1].start_pos, scale);
                let euler = Vec3::new(
                    binang_to_rad(cues[i].rot[0]),
                    binang_to_rad(cues[i].rot[1]),
                    binang_to_rad(cues[i].rot[2]),
                );
                if frame <= end {
                    let span = (end - start) as f32;
                    let blended = here * (end - frame) as f32 + next * (frame - start) as f32;
                    return (blended / span, euler);
                } else if i == cues.len() - 2 {
                    pos = next;
                    rot = euler;
                }
            }
        }
    }
    (pos, rot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ContinueFlag;
    use crate::command::CueId;
    use pretty_assertions::assert_eq;

    fn key(eye: Vec3, at: Vec3, frames: i32) -> CameraKeyPoint {
        CameraKeyPoint {
            eye,
            at,
            roll: 0.0,
            fov: 45.0,
            frames,
        }
    }

    fn uniform_points(count: usize) -> Vec<CameraKeyPoint> {
        (0..count)
            .map(|i| {
                key(
                    Vec3::new(i as f32 * 10.0, 0.0, 0.0),
                    Vec3::new(i as f32 * 10.0, 10.0, 0.0),
                    30,
                )
            })
            .collect()
    }

    #[test]
    fn coefficients_sum_to_one() {
        for t in [0.0f32, 0.25, 0.5, 0.9] {
            let [a, b, c, d] = spline_coeffs(t);
            assert!((a + b + c + d - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn frame_zero_blends_the_first_window() {
        let points = uniform_points(5);
        let state = evaluate(&points, 0);
        // t = 0 weights are (1/6, 2/3, 1/6, 0) over points 0..3.
        let expected = points[0].eye / 6.0 + points[1].eye * 0.6666667 + points[2].eye / 6.0
            + points[3].eye * 0.0;
        assert!((state.eye - expected).length() < 1e-4);
        assert_eq!(state.fov, 45.0);
    }

    #[test]
    fn fewer_than_four_points_is_undefined_and_finite() {
        let points = uniform_points(3);
        for frame in [0, 1, 100] {
            let state = evaluate(&points, frame);
            assert_eq!(state, CameraState::undefined());
            assert!(state.eye.is_finite());
        }
    }

    #[test]
    fn interpolation_stops_one_segment_early() {
        let points = uniform_points(6);
        // Far past the end the state is held, never advanced into the last
        // window and never NaN.
        let late = evaluate(&points, 100_000);
        assert!(late.eye.is_finite());
        let later = evaluate(&points, 100_001);
        assert_eq!(late, later);
    }

    #[test]
    fn zero_frame_points_contribute_no_advance() {
        let mut points = uniform_points(5);
        for point in &mut points {
            point.frames = 0;
        }
        // 1/0 is treated as 0, so the state never advances but stays valid.
        let state = evaluate(&points, 50);
        assert_eq!(state, evaluate(&points, 0));
    }

    #[test]
    fn degenerate_look_vector_gives_the_undefined_pose() {
        let state = CameraState {
            eye: Vec3::new(5.0, 5.0, 5.0),
            at: Vec3::new(5.0, 5.0, 5.0),
            roll: 0.0,
            fov: 60.0,
        };
        assert_eq!(camera_pose(&state), CameraPose::undefined());
    }

    #[test]
    fn straight_down_look_keeps_quaternion_finite() {
        let state = CameraState {
            eye: Vec3::ZERO,
            at: Vec3::new(0.0, 0.0, -10.0),
            roll: 0.0,
            fov: 60.0,
        };
        let pose = camera_pose(&state);
        assert!(pose.orientation.is_finite());
    }

    #[test]
    fn shot_selection_takes_the_latest_started() {
        let shots = vec![
            CameraShot {
                start_frame: 0,
                points: uniform_points(4),
            },
            CameraShot {
                start_frame: 50,
                points: uniform_points(4),
            },
        ];
        assert_eq!(select_shot(&shots, 60).unwrap().start_frame, 50);
        assert_eq!(select_shot(&shots, 10).unwrap().start_frame, 0);
        assert!(select_shot(&shots, 0).is_none());
    }

    fn cue(start: u16, end: u16, start_pos: [i32; 3], end_pos: [i32; 3]) -> ActorCue {
        ActorCue {
            id: CueId::Actor(0),
            start_frame: start,
            end_frame: end,
            rot: [0; 3],
            start_pos,
            end_pos,
            is_dummy: false,
        }
    }

    #[test]
    fn actor_cue_preview_interpolates_linearly() {
        let first = cue(0, 50, [0, 0, 0], [100, 0, 0]);
        let dummy = ActorCue::dummy(&first);
        let cues = vec![first, dummy];

        let (pos, _) = actor_cue_state(&cues, 25, 1.0);
        assert!((pos - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-4);

        // Past the final interval the last position is held.
        let (held, _) = actor_cue_state(&cues, 500, 1.0);
        assert!((held - Vec3::new(100.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn cam_point_pairs_build_host_space_keys() {
        let eye = CamPoint {
            continue_flag: ContinueFlag::Continue,
            cam_roll: 4,
            frame: 30,
            view_angle: 60.0,
            pos: [100, 20, -50],
        };
        let at = CamPoint {
            continue_flag: ContinueFlag::Continue,
            cam_roll: 0,
            frame: 0,
            view_angle: 0.0,
            pos: [100, 40, -50],
        };
        let point = CameraKeyPoint::from_cam_points(&eye, &at, 10.0);
        assert_eq!(point.eye, Vec3::new(10.0, 5.0, 2.0));
        assert_eq!(point.frames, 30);
        assert_eq!(point.fov, 60.0);
        assert_eq!(point.roll, 4.0);
    }
}
