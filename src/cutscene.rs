//! The cutscene aggregate: every command list of one `CutsceneData` block.

use crate::command::{
    write_cmd, ActorCueList, CamList, CamListKind, Destination, EmitOptions, FadeOutSeq,
    LightSetting, Misc, Rumble, Seq, TextEntry, Time, Transition,
};
use crate::error::CsError;

/// A generic list header with its declared entry count.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryList<T> {
    pub declared_total: u32,
    pub entries: Vec<T>,
}

impl<T> EntryList<T> {
    pub fn new(declared_total: u32) -> Self {
        Self {
            declared_total,
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqListKind {
    Start,
    Stop,
}

impl SeqListKind {
    pub fn list_name(self) -> &'static str {
        match self {
            SeqListKind::Start => "CS_START_SEQ_LIST",
            SeqListKind::Stop => "CS_STOP_SEQ_LIST",
        }
    }

    pub fn entry_name(self) -> &'static str {
        match self {
            SeqListKind::Start => "CS_START_SEQ",
            SeqListKind::Stop => "CS_STOP_SEQ",
        }
    }
}

/// `CS_START_SEQ_LIST` / `CS_STOP_SEQ_LIST`, kept in file order in one
/// field since both share the emission slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqList {
    pub kind: SeqListKind,
    pub declared_total: u32,
    pub entries: Vec<Seq>,
}

/// One parsed `CutsceneData` array.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cutscene {
    pub name: String,
    pub frame_count: i32,
    /// Entry total claimed by `CS_BEGIN_CUTSCENE`. Validation compares it
    /// against [`Cutscene::entry_total`]; serialization recomputes it.
    pub declared_entry_total: Option<i64>,
    pub destination: Option<Destination>,
    pub text_lists: Vec<EntryList<TextEntry>>,
    pub misc_lists: Vec<EntryList<Misc>>,
    pub rumble_lists: Vec<EntryList<Rumble>>,
    pub transitions: Vec<Transition>,
    pub light_setting_lists: Vec<EntryList<LightSetting>>,
    pub time_lists: Vec<EntryList<Time>>,
    pub seq_lists: Vec<SeqList>,
    pub fade_out_seq_lists: Vec<EntryList<FadeOutSeq>>,
    pub player_cue_lists: Vec<ActorCueList>,
    pub actor_cue_lists: Vec<ActorCueList>,
    pub cam_eye_spline_lists: Vec<CamList>,
    pub cam_at_spline_lists: Vec<CamList>,
    pub cam_eye_spline_rel_player_lists: Vec<CamList>,
    pub cam_at_spline_rel_player_lists: Vec<CamList>,
    pub cam_eye_lists: Vec<CamList>,
    pub cam_at_lists: Vec<CamList>,
}

impl Cutscene {
    pub fn new(name: impl Into<String>, frame_count: i32) -> Self {
        Self {
            name: name.into(),
            frame_count,
            ..Default::default()
        }
    }

    pub fn cam_lists_mut(&mut self, kind: CamListKind) -> &mut Vec<CamList> {
        match kind {
            CamListKind::EyeSpline => &mut self.cam_eye_spline_lists,
            CamListKind::AtSpline => &mut self.cam_at_spline_lists,
            CamListKind::EyeSplineRelToPlayer => &mut self.cam_eye_spline_rel_player_lists,
            CamListKind::AtSplineRelToPlayer => &mut self.cam_at_spline_rel_player_lists,
            CamListKind::Eye => &mut self.cam_eye_lists,
            CamListKind::At => &mut self.cam_at_lists,
        }
    }

    pub fn cam_lists(&self, kind: CamListKind) -> &[CamList] {
        match kind {
            CamListKind::EyeSpline => &self.cam_eye_spline_lists,
            CamListKind::AtSpline => &self.cam_at_spline_lists,
            CamListKind::EyeSplineRelToPlayer => &self.cam_eye_spline_rel_player_lists,
            CamListKind::AtSplineRelToPlayer => &self.cam_at_spline_rel_player_lists,
            CamListKind::Eye => &self.cam_eye_lists,
            CamListKind::At => &self.cam_at_lists,
        }
    }

    /// Number of top-level script entries. Always recomputed from the
    /// in-memory structure, never read back from a parsed header.
    pub fn entry_total(&self) -> usize {
        self.destination.iter().count()
            + self.transitions.len()
            + self.text_lists.len()
            + self.misc_lists.len()
            + self.rumble_lists.len()
            + self.light_setting_lists.len()
            + self.time_lists.len()
            + self.seq_lists.len()
            + self.fade_out_seq_lists.len()
            + self.player_cue_lists.len()
            + self.actor_cue_lists.len()
            + self.cam_eye_spline_lists.len()
            + self.cam_at_spline_lists.len()
            + self.cam_eye_spline_rel_player_lists.len()
            + self.cam_at_spline_rel_player_lists.len()
            + self.cam_eye_lists.len()
            + self.cam_at_lists.len()
    }

    /// Structural and continuity checks. Nothing is auto-corrected; the
    /// caller decides which violations are fatal.
    pub fn validate(&self) -> Vec<CsError> {
        let mut violations = Vec::new();

        if let Some(declared) = self.declared_entry_total {
            if declared != self.entry_total() as i64 {
                violations.push(CsError::structural(
                    format!(
                        "`{}`: script declares {declared} entries, found {}",
                        self.name,
                        self.entry_total()
                    ),
                    0,
                ));
            }
        }

        for kind in [
            CamListKind::EyeSpline,
            CamListKind::EyeSplineRelToPlayer,
            CamListKind::Eye,
        ] {
            let eyes = self.cam_lists(kind);
            let ats = self.cam_lists(kind.at_counterpart());
            if eyes.len() != ats.len() {
                violations.push(CsError::structural(
                    format!(
                        "`{}`: {} eye list(s) but {} at list(s)",
                        self.name,
                        eyes.len(),
                        ats.len()
                    ),
                    0,
                ));
            }
            for (index, (eye, at)) in eyes.iter().zip(ats).enumerate() {
                if eye.points.len() != at.points.len() {
                    violations.push(CsError::structural(
                        format!(
                            "`{}`: camera shot {index}: eye list has {} point(s), at list has {}",
                            self.name,
                            eye.points.len(),
                            at.points.len()
                        ),
                        0,
                    ));
                }
            }
        }
        for kind in [CamListKind::EyeSpline, CamListKind::EyeSplineRelToPlayer] {
            for list in self.cam_lists(kind).iter().chain(self.cam_lists(kind.at_counterpart())) {
                if list.points.len() < 4 {
                    violations.push(CsError::structural(
                        format!(
                            "`{}`: `{}` needs at least 4 points, found {}",
                            self.name,
                            list.kind.command_name(),
                            list.points.len()
                        ),
                        0,
                    ));
                }
            }
        }

        for list in self.player_cue_lists.iter().chain(&self.actor_cue_lists) {
            let label = if list.is_player { "player" } else { "actor" };
            let real: Vec<_> = list.real_entries().collect();
            if real.len() as u32 != list.declared_total {
                violations.push(CsError::structural(
                    format!(
                        "`{}`: {label} cue list declares {} entries, found {}",
                        self.name,
                        list.declared_total,
                        real.len()
                    ),
                    0,
                ));
            }
            if !list.entries.last().map_or(false, |cue| cue.is_dummy) {
                violations.push(CsError::structural(
                    format!("`{}`: {label} cue list is missing its terminal cue", self.name),
                    0,
                ));
            }
            for pair in real.windows(2) {
                if pair[0].end_frame != pair[1].start_frame {
                    violations.push(CsError::continuity(format!(
                        "`{}`: {label} cue ending at frame {} is followed by one starting at {}",
                        self.name, pair[0].end_frame, pair[1].start_frame
                    )));
                }
                if pair[0].end_pos != pair[1].start_pos {
                    violations.push(CsError::continuity(format!(
                        "`{}`: {label} cue ends at {:?} but the next starts at {:?}",
                        self.name, pair[0].end_pos, pair[1].start_pos
                    )));
                }
            }
        }

        self.check_declared_totals(&mut violations);
        violations
    }

    fn check_declared_totals(&self, violations: &mut Vec<CsError>) {
        let mut check = |label: &str, declared: u32, found: usize| {
            if declared as usize != found {
                violations.push(CsError::structural(
                    format!(
                        "`{}`: {label} declares {declared} entries, found {found}",
                        self.name
                    ),
                    0,
                ));
            }
        };
        for list in &self.text_lists {
            check("text list", list.declared_total, list.entries.len());
        }
        for list in &self.misc_lists {
            check("misc list", list.declared_total, list.entries.len());
        }
        for list in &self.rumble_lists {
            check("rumble list", list.declared_total, list.entries.len());
        }
        for list in &self.light_setting_lists {
            check("light setting list", list.declared_total, list.entries.len());
        }
        for list in &self.time_lists {
            check("time list", list.declared_total, list.entries.len());
        }
        for list in &self.seq_lists {
            check("seq list", list.declared_total, list.entries.len());
        }
        for list in &self.fade_out_seq_lists {
            check("fade-out seq list", list.declared_total, list.entries.len());
        }
    }

    /// Emits the whole `CutsceneData` block. List order matches the order
    /// the engine's own parser expects, independent of parse order.
    pub fn serialize(&self, opts: EmitOptions) -> String {
        let mut out = String::new();
        out.push_str(&format!("CutsceneData {}[] = {{\n", self.name));
        write_cmd(
            &mut out,
            1,
            "CS_BEGIN_CUTSCENE",
            &[self.entry_total().to_string(), self.frame_count.to_string()],
        );

        if let Some(destination) = &self.destination {
            destination.write(&mut out, opts);
        }
        for list in &self.text_lists {
            write_cmd(&mut out, 1, "CS_TEXT_LIST", &[list.entries.len().to_string()]);
            for entry in &list.entries {
                entry.write(&mut out, opts);
            }
        }
        for list in &self.misc_lists {
            write_cmd(&mut out, 1, "CS_MISC_LIST", &[list.entries.len().to_string()]);
            for entry in &list.entries {
                entry.write(&mut out, opts);
            }
        }
        for list in &self.rumble_lists {
            write_cmd(
                &mut out,
                1,
                "CS_RUMBLE_CONTROLLER_LIST",
                &[list.entries.len().to_string()],
            );
            for entry in &list.entries {
                entry.write(&mut out, opts);
            }
        }
        for transition in &self.transitions {
            transition.write(&mut out, opts);
        }
        for list in &self.light_setting_lists {
            write_cmd(
                &mut out,
                1,
                "CS_LIGHT_SETTING_LIST",
                &[list.entries.len().to_string()],
            );
            for entry in &list.entries {
                entry.write(&mut out, opts);
            }
        }
        for list in &self.time_lists {
            write_cmd(&mut out, 1, "CS_TIME_LIST", &[list.entries.len().to_string()]);
            for entry in &list.entries {
                entry.write(&mut out, opts);
            }
        }
        for list in &self.seq_lists {
            write_cmd(
                &mut out,
                1,
                list.kind.list_name(),
                &[list.entries.len().to_string()],
            );
            for entry in &list.entries {
                entry.write(&mut out, list.kind.entry_name(), opts);
            }
        }
        for list in &self.fade_out_seq_lists {
            write_cmd(
                &mut out,
                1,
                "CS_FADE_OUT_SEQ_LIST",
                &[list.entries.len().to_string()],
            );
            for entry in &list.entries {
                entry.write(&mut out, opts);
            }
        }
        for list in self.player_cue_lists.iter().chain(&self.actor_cue_lists) {
            list.write(&mut out, opts);
        }
        for kind in [
            CamListKind::EyeSpline,
            CamListKind::AtSpline,
            CamListKind::EyeSplineRelToPlayer,
            CamListKind::AtSplineRelToPlayer,
            CamListKind::Eye,
            CamListKind::At,
        ] {
            for list in self.cam_lists(kind) {
                list.write(&mut out, opts);
            }
        }

        write_cmd(&mut out, 1, "CS_END", &[]);
        out.push_str("};\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{ActorCue, CamPoint, CueId};
    use crate::codec::ContinueFlag;
    use pretty_assertions::assert_eq;

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

    fn cue_list(entries: Vec<ActorCue>) -> ActorCueList {
        ActorCueList {
            is_player: false,
            command_type: Some(crate::enums::EnumArg::Raw("0x0001".into())),
            declared_total: entries.len() as u32,
            entries,
        }
    }

    fn point(frame: u16, pos: [i16; 3]) -> CamPoint {
        CamPoint {
            continue_flag: ContinueFlag::Continue,
            cam_roll: 0,
            frame,
            view_angle: 45.0,
            pos,
        }
    }

    #[test]
    fn continuity_violations_are_reported_once_per_break() {
        let mut cs = Cutscene::new("demo", 100);
        let first = cue(0, 50, [0; 3], [10, 0, 10]);
        let second = cue(60, 80, [10, 0, 10], [20, 0, 20]);
        let dummy = ActorCue::dummy(&second);
        cs.actor_cue_lists.push(cue_list(vec![first, second]));
        cs.actor_cue_lists[0].entries.push(dummy);
        cs.actor_cue_lists[0].declared_total = 2;

        let continuity: Vec<_> = cs
            .validate()
            .into_iter()
            .filter(|v| matches!(v, CsError::Continuity { .. }))
            .collect();
        assert_eq!(continuity.len(), 1);
    }

    #[test]
    fn missing_terminal_cue_is_a_structural_violation() {
        let mut cs = Cutscene::new("demo", 100);
        cs.actor_cue_lists.push(cue_list(vec![cue(0, 50, [0; 3], [10, 0, 10])]));

        let violations = cs.validate();
        assert!(violations.iter().any(|v| matches!(
            v,
            CsError::Structural { message, .. } if message.contains("terminal cue")
        )));
    }

    #[test]
    fn eye_and_at_lists_must_pair_up() {
        let mut cs = Cutscene::new("demo", 100);
        cs.cam_eye_spline_lists.push(CamList {
            kind: CamListKind::EyeSpline,
            start_frame: 0,
            end_frame: 0,
            points: (0..4).map(|i| point(30, [i, 0, 0])).collect(),
        });

        let violations = cs.validate();
        assert!(violations.iter().any(|v| matches!(
            v,
            CsError::Structural { message, .. } if message.contains("eye list")
        )));
    }

    #[test]
    fn entry_total_is_recomputed_for_the_header() {
        let mut cs = Cutscene::new("demo", 100);
        let first = cue(0, 50, [0; 3], [10, 0, 10]);
        let dummy = ActorCue::dummy(&first);
        cs.actor_cue_lists.push(cue_list(vec![first]));
        cs.actor_cue_lists[0].entries.push(dummy);
        cs.transitions.push(Transition {
            kind: crate::enums::EnumArg::Raw("1".into()),
            start_frame: 0,
            end_frame: 10,
        });

        assert_eq!(cs.entry_total(), 2);
        let text = cs.serialize(EmitOptions::default());
        assert!(text.contains("CS_BEGIN_CUTSCENE(2, 100)"));
        assert!(text.trim_end().ends_with("};"));
    }
}
