//! Actor and player cue commands.

use crate::codec::emit_angle;
use crate::enums::EnumArg;
use crate::error::CsError;

use super::{write_cmd, EmitOptions, Params};

/// Cue action identifier. Plain actors carry a raw 16-bit id, the player
/// list resolves against the player cue enum.
#[derive(Debug, Clone, PartialEq)]
pub enum CueId {
    Actor(u16),
    Player(EnumArg),
}

impl CueId {
    fn emit(&self, use_macros: bool) -> String {
        match self {
            CueId::Actor(id) => format!("0x{id:04X}"),
            CueId::Player(arg) => arg.emit(use_macros),
        }
    }
}

/// One `CS_ACTOR_CUE` / `CS_PLAYER_CUE` entry.
///
/// The trailing terminal cue carries only the previous cue's end state; it
/// exists in memory but is never written back out.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorCue {
    pub id: CueId,
    pub start_frame: u16,
    pub end_frame: u16,
    pub rot: [i16; 3],
    pub start_pos: [i32; 3],
    pub end_pos: [i32; 3],
    pub is_dummy: bool,
}

impl ActorCue {
    pub fn from_params(params: &mut Params, is_player: bool) -> Result<Self, CsError> {
        let id = if is_player {
            CueId::Player(params.enum_arg()?)
        } else {
            CueId::Actor(params.u16()?)
        };
        let start_frame = params.u16()?;
        let end_frame = params.u16()?;
        let rot = [params.angle()?, params.angle()?, params.angle()?];
        let start_pos = [params.i32()?, params.i32()?, params.i32()?];
        let end_pos = [params.i32()?, params.i32()?, params.i32()?];
        // The normal vector slots are unused by the engine.
        params.float()?;
        params.float()?;
        params.float()?;
        Ok(Self {
            id,
            start_frame,
            end_frame,
            rot,
            start_pos,
            end_pos,
            is_dummy: false,
        })
    }

    /// Synthesizes the terminal cue that closes a list: a zero-length
    /// interval pinned at the last real cue's end state.
    pub fn dummy(last: &ActorCue) -> Self {
        Self {
            id: match &last.id {
                CueId::Actor(_) => CueId::Actor(0),
                CueId::Player(_) => CueId::Player(EnumArg::Raw("0".into())),
            },
            start_frame: last.end_frame,
            end_frame: last.end_frame,
            rot: last.rot,
            start_pos: last.end_pos,
            end_pos: last.end_pos,
            is_dummy: true,
        }
    }

    pub fn write(&self, out: &mut String, is_player: bool, opts: EmitOptions) {
        let mut args = vec![
            self.id.emit(opts.use_macros),
            self.start_frame.to_string(),
            self.end_frame.to_string(),
        ];
        args.extend(self.rot.iter().map(|&r| emit_angle(r, opts.use_macros)));
        args.extend(self.start_pos.iter().map(|p| p.to_string()));
        args.extend(self.end_pos.iter().map(|p| p.to_string()));
        args.extend(["0.0f".to_string(), "0.0f".to_string(), "0.0f".to_string()]);
        let name = if is_player { "CS_PLAYER_CUE" } else { "CS_ACTOR_CUE" };
        write_cmd(out, 2, name, &args);
    }
}

/// `CS_ACTOR_CUE_LIST` / `CS_PLAYER_CUE_LIST` with its collected cues.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorCueList {
    pub is_player: bool,
    /// `None` for the player list, which has no command-type slot.
    pub command_type: Option<EnumArg>,
    /// Count claimed by the header; validation compares it against the real
    /// entries, serialization recomputes it.
    pub declared_total: u32,
    pub entries: Vec<ActorCue>,
}

impl ActorCueList {
    pub fn from_params(params: &mut Params, is_player: bool) -> Result<Self, CsError> {
        let command_type = if is_player {
            None
        } else {
            Some(params.enum_arg()?)
        };
        let declared_total = params.int()? as u32;
        Ok(Self {
            is_player,
            command_type,
            declared_total,
            entries: Vec::new(),
        })
    }

    /// Real cues, not counting the terminal one.
    pub fn real_entries(&self) -> impl Iterator<Item = &ActorCue> {
        self.entries.iter().filter(|cue| !cue.is_dummy)
    }

    pub fn write(&self, out: &mut String, opts: EmitOptions) {
        let total = self.real_entries().count();
        let mut args = Vec::new();
        if let Some(command_type) = &self.command_type {
            args.push(command_type.emit(opts.use_macros));
        }
        args.push(total.to_string());
        let name = if self.is_player {
            "CS_PLAYER_CUE_LIST"
        } else {
            "CS_ACTOR_CUE_LIST"
        };
        write_cmd(out, 1, name, &args);
        for cue in self.real_entries() {
            cue.write(out, self.is_player, opts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use pretty_assertions::assert_eq;

    fn cue_tokens() -> Vec<String> {
        [
            "0x0001", "0", "50", "0x0", "0x4000", "0x0", "0", "0", "0", "10", "0", "10", "0.0f",
            "0.0f", "0.0f",
        ]
        .iter()
        .map(|t| t.to_string())
        .collect()
    }

    #[test]
    fn actor_cue_decodes_frames_rotation_and_positions() {
        let schema = schema::lookup("CS_ACTOR_CUE").unwrap();
        let tokens = cue_tokens();
        let mut params = Params::new(schema, &tokens, 1, false).unwrap();
        let cue = ActorCue::from_params(&mut params, false).unwrap();
        assert_eq!(cue.id, CueId::Actor(1));
        assert_eq!(cue.rot[1], 0x4000);
        assert_eq!(cue.end_pos, [10, 0, 10]);
        assert!(!cue.is_dummy);
    }

    #[test]
    fn dummy_cue_pins_the_end_state() {
        let schema = schema::lookup("CS_ACTOR_CUE").unwrap();
        let tokens = cue_tokens();
        let mut params = Params::new(schema, &tokens, 1, false).unwrap();
        let cue = ActorCue::from_params(&mut params, false).unwrap();
        let dummy = ActorCue::dummy(&cue);
        assert_eq!(dummy.start_frame, 50);
        assert_eq!(dummy.end_frame, 50);
        assert_eq!(dummy.start_pos, [10, 0, 10]);
        assert!(dummy.is_dummy);
    }

    #[test]
    fn list_recounts_real_entries_and_skips_the_dummy() {
        let schema = schema::lookup("CS_ACTOR_CUE").unwrap();
        let tokens = cue_tokens();
        let mut params = Params::new(schema, &tokens, 1, false).unwrap();
        let cue = ActorCue::from_params(&mut params, false).unwrap();
        let dummy = ActorCue::dummy(&cue);
        let list = ActorCueList {
            is_player: false,
            command_type: Some(EnumArg::Raw("0x0001".into())),
            declared_total: 1,
            entries: vec![cue, dummy],
        };
        let mut out = String::new();
        list.write(&mut out, EmitOptions::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].trim(), "CS_ACTOR_CUE_LIST(0x0001, 1),");
        assert!(lines[1].trim().starts_with("CS_ACTOR_CUE(0x0001, 0, 50,"));
    }
}
