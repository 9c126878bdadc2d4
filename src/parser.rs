//! `CutsceneData` source text parser.
//!
//! The input is C array-initializer text built out of macro-style command
//! calls. Statements are split at top-level commas and braces, so commands
//! may span several physical lines or share one. Legacy command names are
//! rewritten to their canonical spellings before any structural parsing.

use crate::command::{
    ActorCue, ActorCueList, CamList, CamListKind, Destination, LightSetting, Misc, Params, Rumble,
    Seq, Text, TextEntry, TextOcarinaAction, Time, Transition,
};
use crate::cutscene::{Cutscene, EntryList, SeqList, SeqListKind};
use crate::error::CsError;
use crate::schema::{self, CommandRole, LEGACY_RENAMES};

/// Outcome of parsing one source file. Cutscenes are isolated from each
/// other: a malformed one lands in `errors` and its siblings still parse.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub cutscenes: Vec<Cutscene>,
    pub errors: Vec<CsError>,
}

pub fn parse(source: &str) -> ParseReport {
    parse_filtered(source, None)
}

/// Like [`parse`], but when `only` is given every other `CutsceneData`
/// block is skipped without being decoded.
pub fn parse_filtered(source: &str, only: Option<&str>) -> ParseReport {
    let source = strip_comment_lines(source);
    let source = rewrite_legacy_names(&source);

    let mut report = ParseReport::default();
    let mut state = BlockState::Outside;

    let mut statement = String::new();
    let mut statement_line = 1;
    let mut line = 1;
    let mut depth = 0usize;

    for ch in source.chars() {
        match ch {
            '\n' => {
                line += 1;
                if !statement.trim().is_empty() {
                    statement.push(' ');
                }
                continue;
            }
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    report
                        .errors
                        .push(CsError::structural("unbalanced `)`", line));
                    return report;
                }
                depth -= 1;
            }
            '{' if depth == 0 => {
                statement.push('{');
                handle_statement(&statement, statement_line, only, &mut state, &mut report);
                statement.clear();
                continue;
            }
            '}' if depth == 0 => {
                handle_statement(&statement, statement_line, only, &mut state, &mut report);
                statement.clear();
                close_block(&mut state, line, &mut report);
                continue;
            }
            ',' | ';' if depth == 0 => {
                handle_statement(&statement, statement_line, only, &mut state, &mut report);
                statement.clear();
                continue;
            }
            _ => {}
        }
        if statement.trim().is_empty() {
            statement_line = line;
        }
        statement.push(ch);
    }

    if depth != 0 {
        report
            .errors
            .push(CsError::structural("unbalanced `(` at end of input", line));
    }
    handle_statement(&statement, statement_line, only, &mut state, &mut report);
    close_block(&mut state, line, &mut report);
    report
}

/// Blanks out lines that are entirely comments, keeping line numbering
/// intact. Inline comments are left in place so they fail during token
/// decoding instead of silently truncating a command.
fn strip_comment_lines(source: &str) -> String {
    source
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with("//") || trimmed.starts_with("/*") {
                ""
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrites every legacy command name to its canonical spelling. The
/// trailing `(` keeps prefix-sharing names (`CS_CAM_POS` vs
/// `CS_CAM_POS_LIST`) from clobbering each other.
fn rewrite_legacy_names(source: &str) -> String {
    let mut out = source.to_string();
    for (old, new) in LEGACY_RENAMES {
        if out.contains(old) {
            out = out.replace(&format!("{old}("), &format!("{new}("));
        }
    }
    out
}

/// The command list currently accumulating entries.
enum OpenList {
    Cam(CamList),
    Cue(ActorCueList),
    Text(EntryList<TextEntry>),
    Misc(EntryList<Misc>),
    Light(EntryList<LightSetting>),
    Time(EntryList<Time>),
    Seq(SeqList),
    Fade(EntryList<crate::command::FadeOutSeq>),
    Rumble(EntryList<Rumble>),
}

enum BlockState {
    Outside,
    /// Inside a `CutsceneData` block that parsed cleanly so far.
    Inside {
        cutscene: Cutscene,
        open: Option<OpenList>,
        saw_header: bool,
        finished: bool,
    },
    /// A statement in this block failed; swallow the rest of it.
    Skipping,
}

fn close_block(state: &mut BlockState, line: usize, report: &mut ParseReport) {
    match std::mem::replace(state, BlockState::Outside) {
        BlockState::Outside => {}
        BlockState::Skipping => {}
        BlockState::Inside {
            mut cutscene,
            open,
            saw_header,
            finished,
        } => {
            if let Some(open) = open {
                flush_list(&mut cutscene, open);
            }
            if !finished {
                report.errors.push(CsError::structural(
                    format!("`{}`: block ends without CS_END()", cutscene.name),
                    line,
                ));
                return;
            }
            if !saw_header {
                report.errors.push(CsError::structural(
                    format!("`{}`: block has no CS_BEGIN_CUTSCENE()", cutscene.name),
                    line,
                ));
                return;
            }
            report.cutscenes.push(cutscene);
        }
    }
}

fn flush_list(cutscene: &mut Cutscene, open: OpenList) {
    match open {
        OpenList::Cam(mut list) => {
            // Scripts carry a terminal stop point that is not a key point;
            // it is only distinguishable once a list is big enough.
            if list.points.len() > 4 {
                list.points.pop();
            }
            cutscene.cam_lists_mut(list.kind).push(list);
        }
        OpenList::Cue(list) => {
            if list.is_player {
                cutscene.player_cue_lists.push(list);
            } else {
                cutscene.actor_cue_lists.push(list);
            }
        }
        OpenList::Text(list) => cutscene.text_lists.push(list),
        OpenList::Misc(list) => cutscene.misc_lists.push(list),
        OpenList::Light(list) => cutscene.light_setting_lists.push(list),
        OpenList::Time(list) => cutscene.time_lists.push(list),
        OpenList::Seq(list) => cutscene.seq_lists.push(list),
        OpenList::Fade(list) => cutscene.fade_out_seq_lists.push(list),
        OpenList::Rumble(list) => cutscene.rumble_lists.push(list),
    }
}

fn handle_statement(
    statement: &str,
    line: usize,
    only: Option<&str>,
    state: &mut BlockState,
    report: &mut ParseReport,
) {
    let text = statement.trim();
    if text.is_empty() {
        return;
    }

    if text.contains("CutsceneData") && text.ends_with('{') {
        // A declaration while a block is still open means the previous
        // block never closed; recover at the new boundary.
        if let BlockState::Inside { .. } = state {
            report.errors.push(CsError::structural(
                "new CutsceneData block opens before the previous one closed",
                line,
            ));
        }
        match block_name(text) {
            Some(name) if only.map_or(true, |wanted| wanted == name) => {
                *state = BlockState::Inside {
                    cutscene: Cutscene::new(name, 0),
                    open: None,
                    saw_header: false,
                    finished: false,
                };
            }
            Some(_) => {
                // Not the array the caller asked for.
                *state = BlockState::Skipping;
            }
            None => {
                report.errors.push(CsError::structural(
                    format!("malformed CutsceneData declaration: `{text}`"),
                    line,
                ));
                *state = BlockState::Skipping;
            }
        }
        return;
    }

    match state {
        BlockState::Outside => {
            // Stray extern declarations and such are not ours to judge.
        }
        BlockState::Skipping => {}
        BlockState::Inside {
            cutscene,
            open,
            saw_header,
            finished,
        } => {
            if *finished {
                return;
            }
            match parse_command(text, line, cutscene, open, saw_header) {
                Ok(done) => *finished = done,
                Err(error) => {
                    report.errors.push(error);
                    *state = BlockState::Skipping;
                }
            }
        }
    }
}

/// Extracts the array name from `CutsceneData <name>[...] = {`. A declared
/// array size inside the brackets is tolerated and ignored.
fn block_name(text: &str) -> Option<String> {
    let rest = text.split("CutsceneData").nth(1)?;
    let name = rest.split('[').next()?.trim();
    (!name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_'))
        .then(|| name.to_string())
}

/// Splits `NAME(arg, arg, ...)` into the name and top-level argument
/// tokens. Nested calls such as `DEG_TO_BINANG(...)` stay intact inside
/// their argument.
fn split_command(text: &str, line: usize) -> Result<(String, Vec<String>), CsError> {
    let open = text
        .find('(')
        .ok_or_else(|| CsError::structural(format!("expected a command, found `{text}`"), line))?;
    let name = text[..open].trim().to_string();
    let inner = text[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| CsError::structural(format!("`{name}`: missing closing `)`"), line))?;

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in inner.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    if !current.trim().is_empty() {
        args.push(current.trim().to_string());
    }
    Ok((name, args.into_iter().map(reduce_cs_float).collect()))
}

/// `CS_FLOAT(raw, literal)` wraps a float with its bit pattern; only the
/// literal matters here.
fn reduce_cs_float(arg: String) -> String {
    arg.strip_prefix("CS_FLOAT(")
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(|inner| inner.split(',').nth(1))
        .map(|lit| lit.trim().to_string())
        .unwrap_or(arg)
}

fn parse_command(
    text: &str,
    line: usize,
    cutscene: &mut Cutscene,
    open: &mut Option<OpenList>,
    saw_header: &mut bool,
) -> Result<bool, CsError> {
    let (raw_name, args) = split_command(text, line)?;

    // Unknown-data blobs carry no structure worth keeping.
    if raw_name.starts_with("CS_UNK_DATA") {
        return Ok(false);
    }

    let (name, legacy) = match raw_name.strip_prefix("L_") {
        Some(stripped) => (stripped, true),
        None => (raw_name.as_str(), false),
    };

    let schema = schema::lookup(name)
        .ok_or_else(|| CsError::schema(name, "unknown command", line))?;
    let mut params = Params::new(schema, &args, line, legacy)?;

    if schema.role != CommandRole::ListEntry {
        if let Some(done) = open.take() {
            flush_list(cutscene, done);
        }
    }

    match schema.role {
        CommandRole::Standalone => match name {
            "CS_BEGIN_CUTSCENE" => {
                cutscene.declared_entry_total = Some(params.int()?);
                cutscene.frame_count = params.i32()?;
                *saw_header = true;
            }
            "CS_END" => return Ok(true),
            "CS_TRANSITION" => cutscene
                .transitions
                .push(Transition::from_params(&mut params)?),
            "CS_DESTINATION" => {
                cutscene.destination = Some(Destination::from_params(&mut params)?);
            }
            _ => return Err(CsError::schema(name, "unhandled standalone command", line)),
        },
        CommandRole::ListHeader => {
            let list = if let Some(kind) = CamListKind::from_command(name) {
                OpenList::Cam(CamList::from_params(kind, &mut params)?)
            } else {
                match name {
                    "CS_ACTOR_CUE_LIST" => {
                        OpenList::Cue(ActorCueList::from_params(&mut params, false)?)
                    }
                    "CS_PLAYER_CUE_LIST" => {
                        OpenList::Cue(ActorCueList::from_params(&mut params, true)?)
                    }
                    "CS_TEXT_LIST" => OpenList::Text(EntryList::new(params.int()? as u32)),
                    "CS_MISC_LIST" => OpenList::Misc(EntryList::new(params.int()? as u32)),
                    "CS_LIGHT_SETTING_LIST" => {
                        OpenList::Light(EntryList::new(params.int()? as u32))
                    }
                    "CS_TIME_LIST" => OpenList::Time(EntryList::new(params.int()? as u32)),
                    "CS_START_SEQ_LIST" => OpenList::Seq(SeqList {
                        kind: SeqListKind::Start,
                        declared_total: params.int()? as u32,
                        entries: Vec::new(),
                    }),
                    "CS_STOP_SEQ_LIST" => OpenList::Seq(SeqList {
                        kind: SeqListKind::Stop,
                        declared_total: params.int()? as u32,
                        entries: Vec::new(),
                    }),
                    "CS_FADE_OUT_SEQ_LIST" => {
                        OpenList::Fade(EntryList::new(params.int()? as u32))
                    }
                    "CS_RUMBLE_CONTROLLER_LIST" => {
                        OpenList::Rumble(EntryList::new(params.int()? as u32))
                    }
                    _ => return Err(CsError::schema(name, "unhandled list header", line)),
                }
            };
            *open = Some(list);
        }
        CommandRole::ListEntry => {
            let mismatch =
                || CsError::structural(format!("`{name}` outside its list header"), line);
            match open.as_mut().ok_or_else(mismatch)? {
                OpenList::Cam(list) if name == "CS_CAM_POINT" => {
                    list.points.push(crate::command::CamPoint::from_params(&mut params)?);
                }
                OpenList::Cue(list)
                    if (name == "CS_ACTOR_CUE" && !list.is_player)
                        || (name == "CS_PLAYER_CUE" && list.is_player) =>
                {
                    list.entries
                        .push(ActorCue::from_params(&mut params, list.is_player)?);
                }
                OpenList::Text(list) if name == "CS_TEXT" => {
                    list.entries
                        .push(TextEntry::Text(Text::from_params(&mut params)?));
                }
                OpenList::Text(list) if name == "CS_TEXT_NONE" => {
                    list.entries.push(TextEntry::none_from_params(&mut params)?);
                }
                OpenList::Text(list) if name == "CS_TEXT_OCARINA_ACTION" => {
                    list.entries.push(TextEntry::OcarinaAction(
                        TextOcarinaAction::from_params(&mut params)?,
                    ));
                }
                OpenList::Misc(list) if name == "CS_MISC" => {
                    list.entries.push(Misc::from_params(&mut params)?);
                }
                OpenList::Light(list) if name == "CS_LIGHT_SETTING" => {
                    list.entries.push(LightSetting::from_params(&mut params)?);
                }
                OpenList::Time(list) if name == "CS_TIME" => {
                    list.entries.push(Time::from_params(&mut params)?);
                }
                OpenList::Seq(list)
                    if (name == "CS_START_SEQ" && list.kind == SeqListKind::Start)
                        || (name == "CS_STOP_SEQ" && list.kind == SeqListKind::Stop) =>
                {
                    list.entries.push(Seq::from_params(&mut params)?);
                }
                OpenList::Fade(list) if name == "CS_FADE_OUT_SEQ" => {
                    list.entries
                        .push(crate::command::FadeOutSeq::from_params(&mut params)?);
                }
                OpenList::Rumble(list) if name == "CS_RUMBLE_CONTROLLER" => {
                    list.entries.push(Rumble::from_params(&mut params)?);
                }
                _ => return Err(mismatch()),
            }
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CueId, EmitOptions};
    use crate::enums::EnumArg;
    use pretty_assertions::assert_eq;

    #[test]
    fn end_to_end_single_block() {
        let source = "CutsceneData testCs[] = { CS_BEGIN_CUTSCENE(3, 100), \
                      CS_ACTOR_CUE_LIST(0x0001, 1), \
                      CS_ACTOR_CUE(0, 0, 50, 0,0,0, 0,0,0, 10,0,10, 0,0,0), \
                      CS_END(), };";
        let report = parse(source);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(report.cutscenes.len(), 1);

        let cs = &report.cutscenes[0];
        assert_eq!(cs.name, "testCs");
        assert_eq!(cs.frame_count, 100);
        assert_eq!(cs.actor_cue_lists.len(), 1);

        let list = &cs.actor_cue_lists[0];
        assert_eq!(list.command_type, Some(EnumArg::Raw("0x0001".into())));
        assert_eq!(list.entries.len(), 1);
        let cue = &list.entries[0];
        assert_eq!(cue.id, CueId::Actor(0));
        assert_eq!((cue.start_frame, cue.end_frame), (0, 50));
        assert_eq!(cue.start_pos, [0, 0, 0]);
        assert_eq!(cue.end_pos, [10, 0, 10]);

        // The hand-written block has no terminal cue; validation says so.
        assert!(cs.validate().iter().any(|v| matches!(
            v,
            CsError::Structural { message, .. } if message.contains("terminal cue")
        )));
    }

    #[test]
    fn legacy_aliases_parse_like_canonical_names() {
        let legacy = "CutsceneData demo[] = {\n\
                      \tCS_BEGIN_CUTSCENE(1, 60),\n\
                      \tCS_PLAY_BGM_LIST(1),\n\
                      \t\tCS_PLAY_BGM(2, 0, 60, 0, 0, 0, 0, 0, 0, 0, 0),\n\
                      \tCS_END(),\n\
                      };\n";
        let canonical = "CutsceneData demo[] = {\n\
                         \tCS_BEGIN_CUTSCENE(1, 60),\n\
                         \tCS_START_SEQ_LIST(1),\n\
                         \t\tCS_START_SEQ(1, 0, 60, 0, 0, 0, 0, 0, 0, 0, 0),\n\
                         \tCS_END(),\n\
                         };\n";
        let a = parse(legacy);
        let b = parse(canonical);
        assert!(a.errors.is_empty(), "{:?}", a.errors);
        assert_eq!(a.cutscenes, b.cutscenes);
    }

    #[test]
    fn commands_merge_across_physical_lines() {
        let source = "CutsceneData demo[] = {\n\
                      CS_BEGIN_CUTSCENE(1,\n\
                      \t\t60),\n\
                      CS_TRANSITION(CS_TRANS_GRADUAL_WHITE,\n 0, 10),\n\
                      CS_END(),\n};\n";
        let report = parse(source);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(report.cutscenes[0].transitions.len(), 1);
    }

    #[test]
    fn comment_lines_are_ignored() {
        let source = "// header comment\n\
                      CutsceneData demo[8] = {\n\
                      /* block comment line */\n\
                      CS_BEGIN_CUTSCENE(0, 30),\n\
                      CS_END(),\n};\n";
        let report = parse(source);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(report.cutscenes[0].name, "demo");
    }

    #[test]
    fn a_bad_cutscene_does_not_poison_its_siblings() {
        let source = "CutsceneData broken[] = {\n\
                      CS_BEGIN_CUTSCENE(0, 30),\n\
                      CS_TRANSITION(1, 0),\n\
                      CS_END(),\n};\n\
                      CutsceneData fine[] = {\n\
                      CS_BEGIN_CUTSCENE(0, 30),\n\
                      CS_END(),\n};\n";
        let report = parse(source);
        assert_eq!(report.cutscenes.len(), 1);
        assert_eq!(report.cutscenes[0].name, "fine");
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(report.errors[0], CsError::Schema { line: 3, .. }));
    }

    #[test]
    fn entries_outside_a_list_fail_structurally() {
        let source = "CutsceneData demo[] = {\n\
                      CS_BEGIN_CUTSCENE(0, 30),\n\
                      CS_CAM_POINT(CS_CMD_CONTINUE, 0, 30, 45.0f, 0, 0, 0, 0),\n\
                      CS_END(),\n};\n";
        let report = parse(source);
        assert!(report.cutscenes.is_empty());
        assert!(matches!(report.errors[0], CsError::Structural { .. }));
    }

    #[test]
    fn unbalanced_parens_at_eof_are_reported() {
        let report = parse("CutsceneData demo[] = {\nCS_BEGIN_CUTSCENE(0, 30\n");
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, CsError::Structural { message, .. } if message.contains("unbalanced"))));
    }

    #[test]
    fn sentinel_point_is_stripped_only_past_four_points() {
        let mut body = String::from(
            "CutsceneData demo[] = {\nCS_BEGIN_CUTSCENE(2, 90),\nCS_CAM_EYE_SPLINE(0, 90),\n",
        );
        for i in 0..4 {
            body.push_str(&format!(
                "CS_CAM_POINT(CS_CMD_CONTINUE, 0, 30, 45.0f, {i}, 0, 0, 0),\n"
            ));
        }
        body.push_str("CS_CAM_POINT(CS_CMD_STOP, 0, 0, 0.0f, 0, 0, 0, 0),\n");
        body.push_str("CS_CAM_AT_SPLINE(0, 90),\n");
        for i in 0..4 {
            body.push_str(&format!(
                "CS_CAM_POINT(CS_CMD_CONTINUE, 0, 30, 45.0f, {i}, 0, 100, 0),\n"
            ));
        }
        body.push_str("CS_CAM_POINT(CS_CMD_STOP, 0, 0, 0.0f, 0, 0, 0, 0),\n");
        body.push_str("CS_END(),\n};\n");

        let report = parse(&body);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        let cs = &report.cutscenes[0];
        assert_eq!(cs.cam_eye_spline_lists[0].points.len(), 4);
        assert_eq!(cs.cam_at_spline_lists[0].points.len(), 4);
    }

    #[test]
    fn header_entry_total_mismatch_is_reported() {
        let source = "CutsceneData demo[] = {\n\
                      CS_BEGIN_CUTSCENE(99, 100),\n\
                      CS_TRANSITION(CS_TRANS_GRADUAL_WHITE, 0, 10),\n\
                      CS_END(),\n};\n";
        let report = parse(source);
        assert!(report.errors.is_empty(), "{:?}", report.errors);

        let cs = &report.cutscenes[0];
        assert_eq!(cs.declared_entry_total, Some(99));
        assert_eq!(cs.entry_total(), 1);
        assert!(cs.validate().iter().any(|v| matches!(
            v,
            CsError::Structural { message, .. } if message.contains("declares 99")
        )));
    }

    #[test]
    fn name_filter_skips_other_blocks() {
        let source = "CutsceneData intro[] = {\n\
                      CS_BEGIN_CUTSCENE(0, 30),\n\
                      CS_END(),\n};\n\
                      CutsceneData ending[] = {\n\
                      CS_BEGIN_CUTSCENE(0, 45),\n\
                      CS_END(),\n};\n";
        let report = parse_filtered(source, Some("ending"));
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(report.cutscenes.len(), 1);
        assert_eq!(report.cutscenes[0].name, "ending");
    }

    #[test]
    fn cs_float_reduces_to_its_literal() {
        let wrapped = "CutsceneData demo[] = {\n\
                       CS_BEGIN_CUTSCENE(1, 60),\n\
                       CS_CAM_EYE_SPLINE(0, 60),\n\
                       CS_CAM_POINT(CS_CMD_CONTINUE, 0, 30, \
                       CS_FLOAT(0x42480000, 50.0f), 0, 0, 0, 0),\n\
                       CS_END(),\n};\n";
        let raw = wrapped.replace("CS_FLOAT(0x42480000, 50.0f)", "0x42480000");
        let lit = wrapped.replace("CS_FLOAT(0x42480000, 50.0f)", "50.0f");

        let a = parse(wrapped);
        let b = parse(&raw);
        let c = parse(&lit);
        assert!(a.errors.is_empty(), "{:?}", a.errors);
        assert_eq!(a.cutscenes[0].cam_eye_spline_lists[0].points[0].view_angle, 50.0);
        assert_eq!(a.cutscenes, b.cutscenes);
        assert_eq!(a.cutscenes, c.cutscenes);
    }

    #[test]
    fn short_camera_lists_do_not_grow_across_reparses() {
        let mut body = String::from(
            "CutsceneData demo[] = {\nCS_BEGIN_CUTSCENE(2, 90),\nCS_CAM_EYE_SPLINE(0, 90),\n",
        );
        for i in 0..3 {
            body.push_str(&format!(
                "CS_CAM_POINT(CS_CMD_CONTINUE, 0, 30, 45.0f, {i}, 0, 0, 0),\n"
            ));
        }
        body.push_str("CS_CAM_AT_SPLINE(0, 90),\n");
        for i in 0..3 {
            body.push_str(&format!(
                "CS_CAM_POINT(CS_CMD_CONTINUE, 0, 30, 45.0f, {i}, 0, 100, 0),\n"
            ));
        }
        body.push_str("CS_END(),\n};\n");

        let first = parse(&body);
        assert!(first.errors.is_empty(), "{:?}", first.errors);
        assert_eq!(first.cutscenes[0].cam_eye_spline_lists[0].points.len(), 3);

        // Too short to interpolate, but reparsing must not add points.
        let text = first.cutscenes[0].serialize(EmitOptions { use_macros: false });
        let second = parse(&text);
        assert!(second.errors.is_empty(), "{:?}", second.errors);
        assert_eq!(second.cutscenes, first.cutscenes);
    }

    #[test]
    fn serialize_then_parse_is_a_fixed_point() {
        let mut body = String::from(
            "CutsceneData demo[] = {\nCS_BEGIN_CUTSCENE(2, 90),\nCS_CAM_EYE_SPLINE(0, 90),\n",
        );
        for i in 0..5 {
            body.push_str(&format!(
                "CS_CAM_POINT(CS_CMD_CONTINUE, 0, 30, 45.0f, {i}, 0, 0, 0),\n"
            ));
        }
        body.push_str("CS_CAM_POINT(CS_CMD_STOP, 0, 0, 0.0f, 0, 0, 0, 0),\n");
        body.push_str("CS_CAM_AT_SPLINE(0, 90),\n");
        for i in 0..5 {
            body.push_str(&format!(
                "CS_CAM_POINT(CS_CMD_CONTINUE, 0, 30, 45.0f, {i}, 0, 100, 0),\n"
            ));
        }
        body.push_str("CS_CAM_POINT(CS_CMD_STOP, 0, 0, 0.0f, 0, 0, 0, 0),\n");
        body.push_str("CS_END(),\n};\n");

        let first = parse(&body);
        assert!(first.errors.is_empty(), "{:?}", first.errors);
        let text = first.cutscenes[0].serialize(EmitOptions { use_macros: false });

        let second = parse(&text);
        assert!(second.errors.is_empty(), "{:?}", second.errors);
        assert_eq!(second.cutscenes, first.cutscenes);
        assert_eq!(
            second.cutscenes[0].serialize(EmitOptions { use_macros: false }),
            text
        );
    }
}
