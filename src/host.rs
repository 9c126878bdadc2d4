//! Host-object boundary.
//!
//! The core never touches a 3D application directly; it drives this small
//! node interface instead. Import creates nodes and writes transforms,
//! export enumerates nodes and reads them back. Everything the interface
//! cannot carry (frame numbers, view angles, camera roll, the at-point of a
//! camera key) lives in the adapter's own side tables, keyed by node handle.

use std::collections::HashMap;

use glam::Vec3;

use crate::codec::{binang_to_rad, engine_from_host, host_from_engine, normalize_binang, ContinueFlag};
use crate::command::{ActorCue, ActorCueList, CamList, CamListKind, CamPoint, CueId};
use crate::cutscene::Cutscene;
use crate::enums::EnumArg;
use crate::error::CsError;

pub type NodeHandle = usize;

/// The five operations the core is allowed to perform on a host scene.
/// Markers are matched as node-name prefixes.
pub trait HostScene {
    fn create_empty_node(&mut self, name: &str, parent: Option<NodeHandle>) -> NodeHandle;
    fn create_armature_node(&mut self, name: &str, parent: Option<NodeHandle>) -> NodeHandle;
    fn enumerate_children_by_marker(&self, node: NodeHandle, marker: &str) -> Vec<NodeHandle>;
    /// Returns (position, euler rotation in radians).
    fn get_local_transform(&self, node: NodeHandle) -> (Vec3, Vec3);
    fn set_local_transform(&mut self, node: NodeHandle, position: Vec3, rotation: Vec3);
}

const MARKER_ACTOR_CUE_LIST: &str = "CS Actor Cue List";
const MARKER_PLAYER_CUE_LIST: &str = "CS Player Cue List";
const MARKER_CUE_POINT: &str = "CS Cue Point";
const MARKER_CAM_SHOT: &str = "camShot";
const MARKER_CAM_POINT: &str = "CS Cam Point";

/// In-memory host scene, sufficient for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: Vec<SceneNode>,
}

#[derive(Debug)]
struct SceneNode {
    name: String,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
    position: Vec3,
    rotation: Vec3,
    is_armature: bool,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_name(&self, node: NodeHandle) -> &str {
        &self.nodes[node].name
    }

    pub fn parent_of(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.nodes[node].parent
    }

    pub fn is_armature(&self, node: NodeHandle) -> bool {
        self.nodes[node].is_armature
    }

    fn insert(&mut self, name: &str, parent: Option<NodeHandle>, is_armature: bool) -> NodeHandle {
        let handle = self.nodes.len();
        self.nodes.push(SceneNode {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            is_armature,
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(handle);
        }
        handle
    }
}

impl HostScene for MemoryScene {
    fn create_empty_node(&mut self, name: &str, parent: Option<NodeHandle>) -> NodeHandle {
        self.insert(name, parent, false)
    }

    fn create_armature_node(&mut self, name: &str, parent: Option<NodeHandle>) -> NodeHandle {
        self.insert(name, parent, true)
    }

    fn enumerate_children_by_marker(&self, node: NodeHandle, marker: &str) -> Vec<NodeHandle> {
        self.nodes[node]
            .children
            .iter()
            .copied()
            .filter(|&child| self.nodes[child].name.starts_with(marker))
            .collect()
    }

    fn get_local_transform(&self, node: NodeHandle) -> (Vec3, Vec3) {
        (self.nodes[node].position, self.nodes[node].rotation)
    }

    fn set_local_transform(&mut self, node: NodeHandle, position: Vec3, rotation: Vec3) {
        self.nodes[node].position = position;
        self.nodes[node].rotation = rotation;
    }
}

#[derive(Debug, Clone)]
struct CueListMeta {
    is_player: bool,
    command_type: Option<EnumArg>,
}

#[derive(Debug, Clone)]
struct CuePointMeta {
    id: CueId,
    start_frame: u16,
}

#[derive(Debug, Clone)]
struct ShotMeta {
    kind: CamListKind,
    start_frame: u16,
    end_frame: u16,
}

#[derive(Debug, Clone)]
struct CamPointMeta {
    at: Vec3,
    frame: u16,
    view_angle: f32,
    cam_roll: i8,
}

/// The node tree built for one cutscene, plus the side tables carrying the
/// channels the transform interface cannot.
#[derive(Debug)]
pub struct MotionRig {
    pub root: NodeHandle,
    cue_lists: HashMap<NodeHandle, CueListMeta>,
    cue_points: HashMap<NodeHandle, CuePointMeta>,
    shots: HashMap<NodeHandle, ShotMeta>,
    cam_points: HashMap<NodeHandle, CamPointMeta>,
}

/// Builds the host node tree for a cutscene's motion data. Cue lists that
/// come in without a terminal cue get one appended here, pinned at the last
/// cue's end state.
pub fn import_motion(
    scene: &mut impl HostScene,
    cutscene: &Cutscene,
    scale: f32,
) -> Result<MotionRig, CsError> {
    let root = scene.create_empty_node(&format!("Cutscene.{}", cutscene.name), None);
    let mut rig = MotionRig {
        root,
        cue_lists: HashMap::new(),
        cue_points: HashMap::new(),
        shots: HashMap::new(),
        cam_points: HashMap::new(),
    };

    for list in cutscene.actor_cue_lists.iter().chain(&cutscene.player_cue_lists) {
        import_cue_list(scene, &mut rig, root, list, scale)?;
    }

    let mut shot_index = 0usize;
    for kind in [
        CamListKind::EyeSpline,
        CamListKind::EyeSplineRelToPlayer,
        CamListKind::Eye,
    ] {
        let eyes = cutscene.cam_lists(kind);
        let ats = cutscene.cam_lists(kind.at_counterpart());
        for (eye_list, at_list) in eyes.iter().zip(ats) {
            if eye_list.points.len() != at_list.points.len() {
                return Err(CsError::structural(
                    format!(
                        "`{}`: cannot build camera shot, eye/at point counts differ",
                        cutscene.name
                    ),
                    0,
                ));
            }
            shot_index += 1;
            let shot = scene.create_armature_node(
                &format!("{MARKER_CAM_SHOT}{shot_index:02}"),
                Some(root),
            );
            rig.shots.insert(
                shot,
                ShotMeta {
                    kind,
                    start_frame: eye_list.start_frame,
                    end_frame: eye_list.end_frame,
                },
            );
            for (index, (eye, at)) in eye_list.points.iter().zip(&at_list.points).enumerate() {
                let node = scene
                    .create_empty_node(&format!("{MARKER_CAM_POINT} {index:02}"), Some(shot));
                scene.set_local_transform(node, host_from_engine(eye.pos, scale), Vec3::ZERO);
                rig.cam_points.insert(
                    node,
                    CamPointMeta {
                        at: host_from_engine(at.pos, scale),
                        frame: eye.frame,
                        view_angle: eye.view_angle,
                        cam_roll: eye.cam_roll,
                    },
                );
            }
        }
    }
    Ok(rig)
}

fn import_cue_list(
    scene: &mut impl HostScene,
    rig: &mut MotionRig,
    root: NodeHandle,
    list: &ActorCueList,
    scale: f32,
) -> Result<(), CsError> {
    let marker = if list.is_player {
        MARKER_PLAYER_CUE_LIST
    } else {
        MARKER_ACTOR_CUE_LIST
    };
    let list_node = scene.create_empty_node(marker, Some(root));
    rig.cue_lists.insert(
        list_node,
        CueListMeta {
            is_player: list.is_player,
            command_type: list.command_type.clone(),
        },
    );

    let mut index = 0usize;
    for cue in list.real_entries() {
        place_cue_point(scene, rig, list_node, index, cue, scale);
        index += 1;
    }
    // Terminal cue: present in well-formed data, synthesized otherwise so
    // the rig always carries the final end state.
    match list.entries.iter().find(|cue| cue.is_dummy) {
        Some(dummy) => place_cue_point(scene, rig, list_node, index, dummy, scale),
        None => {
            if let Some(last) = list.real_entries().last() {
                let dummy = ActorCue::dummy(last);
                place_cue_point(scene, rig, list_node, index, &dummy, scale);
            }
        }
    }
    Ok(())
}

fn place_cue_point(
    scene: &mut impl HostScene,
    rig: &mut MotionRig,
    list_node: NodeHandle,
    index: usize,
    cue: &ActorCue,
    scale: f32,
) {
    let pos = cue_host_pos(cue.start_pos, scale);
    let rot = Vec3::new(
        binang_to_rad(cue.rot[0]),
        binang_to_rad(cue.rot[1]),
        binang_to_rad(cue.rot[2]),
    );
    let node = scene.create_empty_node(&format!("{MARKER_CUE_POINT} {index:02}"), Some(list_node));
    scene.set_local_transform(node, pos, rot);
    rig.cue_points.insert(
        node,
        CuePointMeta {
            id: cue.id.clone(),
            start_frame: cue.start_frame,
        },
    );
}

fn cue_host_pos(pos: [i32; 3], scale: f32) -> Vec3 {
    Vec3::new(
        pos[0] as f32 / scale,
        -pos[2] as f32 / scale,
        pos[1] as f32 / scale,
    )
}

fn cue_engine_pos(pos: Vec3, scale: f32) -> [i32; 3] {
    [
        (pos.x * scale).round() as i32,
        (pos.z * scale).round() as i32,
        (-pos.y * scale).round() as i32,
    ]
}

fn rot_to_binang(rot: Vec3) -> [i16; 3] {
    let conv = |radians: f32| {
        normalize_binang((radians as f64 / std::f64::consts::TAU * 65536.0).round() as i64)
    };
    [conv(rot.x), conv(rot.y), conv(rot.z)]
}

/// Reads the host node tree back into a cutscene's motion lists. The
/// non-motion lists of `base` are preserved untouched.
pub fn export_motion(
    scene: &impl HostScene,
    rig: &MotionRig,
    base: &Cutscene,
    scale: f32,
) -> Result<Cutscene, CsError> {
    let mut cutscene = base.clone();
    cutscene.actor_cue_lists.clear();
    cutscene.player_cue_lists.clear();
    for kind in [
        CamListKind::EyeSpline,
        CamListKind::AtSpline,
        CamListKind::EyeSplineRelToPlayer,
        CamListKind::AtSplineRelToPlayer,
        CamListKind::Eye,
        CamListKind::At,
    ] {
        cutscene.cam_lists_mut(kind).clear();
    }

    for marker in [MARKER_PLAYER_CUE_LIST, MARKER_ACTOR_CUE_LIST] {
        for list_node in scene.enumerate_children_by_marker(rig.root, marker) {
            let meta = rig.cue_lists.get(&list_node).ok_or_else(|| {
                CsError::structural("cue list node has no import metadata", 0)
            })?;
            let list = export_cue_list(scene, rig, list_node, meta, scale)?;
            if meta.is_player {
                cutscene.player_cue_lists.push(list);
            } else {
                cutscene.actor_cue_lists.push(list);
            }
        }
    }

    for shot_node in scene.enumerate_children_by_marker(rig.root, MARKER_CAM_SHOT) {
        let meta = rig.shots.get(&shot_node).ok_or_else(|| {
            CsError::structural("camera shot node has no import metadata", 0)
        })?;
        let (eye_list, at_list) = export_shot(scene, rig, shot_node, meta, scale)?;
        cutscene.cam_lists_mut(meta.kind).push(eye_list);
        cutscene
            .cam_lists_mut(meta.kind.at_counterpart())
            .push(at_list);
    }
    Ok(cutscene)
}

fn export_cue_list(
    scene: &impl HostScene,
    rig: &MotionRig,
    list_node: NodeHandle,
    meta: &CueListMeta,
    scale: f32,
) -> Result<ActorCueList, CsError> {
    let point_nodes = scene.enumerate_children_by_marker(list_node, MARKER_CUE_POINT);
    let mut entries = Vec::new();

    for pair in point_nodes.windows(2) {
        let here = rig.cue_points.get(&pair[0]).ok_or_else(|| {
            CsError::structural("cue point node has no import metadata", 0)
        })?;
        let next = rig.cue_points.get(&pair[1]).ok_or_else(|| {
            CsError::structural("cue point node has no import metadata", 0)
        })?;
        let (pos, rot) = scene.get_local_transform(pair[0]);
        let (next_pos, _) = scene.get_local_transform(pair[1]);
        entries.push(ActorCue {
            id: here.id.clone(),
            start_frame: here.start_frame,
            end_frame: next.start_frame,
            rot: rot_to_binang(rot),
            start_pos: cue_engine_pos(pos, scale),
            end_pos: cue_engine_pos(next_pos, scale),
            is_dummy: false,
        });
    }

    if let Some(last) = entries.last() {
        entries.push(ActorCue::dummy(last));
    }
    let total = entries.iter().filter(|cue| !cue.is_dummy).count() as u32;
    Ok(ActorCueList {
        is_player: meta.is_player,
        command_type: meta.command_type.clone(),
        declared_total: total,
        entries,
    })
}

fn export_shot(
    scene: &impl HostScene,
    rig: &MotionRig,
    shot_node: NodeHandle,
    meta: &ShotMeta,
    scale: f32,
) -> Result<(CamList, CamList), CsError> {
    let mut eye_points = Vec::new();
    let mut at_points = Vec::new();

    for node in scene.enumerate_children_by_marker(shot_node, MARKER_CAM_POINT) {
        let point = rig.cam_points.get(&node).ok_or_else(|| {
            CsError::structural("camera point node has no import metadata", 0)
        })?;
        let (eye_pos, _) = scene.get_local_transform(node);
        let eye_engine = engine_from_host(eye_pos, scale)
            .map_err(|message| CsError::range("CS_CAM_POINT", "pos", format!("{eye_pos}"), message, 0))?;
        let at_engine = engine_from_host(point.at, scale)
            .map_err(|message| CsError::range("CS_CAM_POINT", "pos", format!("{}", point.at), message, 0))?;
        eye_points.push(CamPoint {
            continue_flag: ContinueFlag::Continue,
            cam_roll: point.cam_roll,
            frame: point.frame,
            view_angle: point.view_angle,
            pos: eye_engine,
        });
        at_points.push(CamPoint {
            continue_flag: ContinueFlag::Continue,
            cam_roll: 0,
            frame: 0,
            view_angle: 0.0,
            pos: at_engine,
        });
    }

    let eye_list = CamList {
        kind: meta.kind,
        start_frame: meta.start_frame,
        end_frame: meta.end_frame,
        points: eye_points,
    };
    let at_list = CamList {
        kind: meta.kind.at_counterpart(),
        start_frame: meta.start_frame,
        end_frame: meta.end_frame,
        points: at_points,
    };
    Ok((eye_list, at_list))
}
