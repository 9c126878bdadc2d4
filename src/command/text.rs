//! Textbox commands. A text list mixes three entry kinds.

use crate::enums::EnumArg;
use crate::error::CsError;

use super::{write_cmd, EmitOptions, Params};

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text_id: u16,
    pub start_frame: u16,
    pub end_frame: u16,
    pub kind: EnumArg,
    pub alt_text_id_1: u16,
    pub alt_text_id_2: u16,
}

impl Text {
    pub fn from_params(params: &mut Params) -> Result<Self, CsError> {
        Ok(Self {
            text_id: params.u16()?,
            start_frame: params.u16()?,
            end_frame: params.u16()?,
            kind: params.enum_arg()?,
            alt_text_id_1: params.u16()?,
            alt_text_id_2: params.u16()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOcarinaAction {
    pub ocarina_action: EnumArg,
    pub start_frame: u16,
    pub end_frame: u16,
    pub message_id: u16,
}

impl TextOcarinaAction {
    pub fn from_params(params: &mut Params) -> Result<Self, CsError> {
        Ok(Self {
            ocarina_action: params.enum_arg()?,
            start_frame: params.u16()?,
            end_frame: params.u16()?,
            message_id: params.u16()?,
        })
    }
}

/// One entry of a `CS_TEXT_LIST`.
#[derive(Debug, Clone, PartialEq)]
pub enum TextEntry {
    Text(Text),
    None { start_frame: u16, end_frame: u16 },
    OcarinaAction(TextOcarinaAction),
}

impl TextEntry {
    pub fn none_from_params(params: &mut Params) -> Result<Self, CsError> {
        Ok(Self::None {
            start_frame: params.u16()?,
            end_frame: params.u16()?,
        })
    }

    pub fn write(&self, out: &mut String, opts: EmitOptions) {
        match self {
            TextEntry::Text(text) => write_cmd(
                out,
                2,
                "CS_TEXT",
                &[
                    format!("0x{:04X}", text.text_id),
                    text.start_frame.to_string(),
                    text.end_frame.to_string(),
                    text.kind.emit(opts.use_macros),
                    format!("0x{:04X}", text.alt_text_id_1),
                    format!("0x{:04X}", text.alt_text_id_2),
                ],
            ),
            TextEntry::None {
                start_frame,
                end_frame,
            } => write_cmd(
                out,
                2,
                "CS_TEXT_NONE",
                &[start_frame.to_string(), end_frame.to_string()],
            ),
            TextEntry::OcarinaAction(action) => write_cmd(
                out,
                2,
                "CS_TEXT_OCARINA_ACTION",
                &[
                    action.ocarina_action.emit(opts.use_macros),
                    action.start_frame.to_string(),
                    action.end_frame.to_string(),
                    format!("0x{:04X}", action.message_id),
                ],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use pretty_assertions::assert_eq;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn text_entry_decodes_its_enum_type() {
        let schema = schema::lookup("CS_TEXT").unwrap();
        let raw = tokens(&["0x00B4", "0", "10", "CS_TEXT_CHOICE", "0xFFFF", "0xFFFF"]);
        let mut params = Params::new(schema, &raw, 1, false).unwrap();
        let text = Text::from_params(&mut params).unwrap();
        assert_eq!(text.text_id, 0xB4);
        assert_eq!(text.kind.emit(false), "1");
    }

    #[test]
    fn ocarina_entry_round_trips_through_text() {
        let schema = schema::lookup("CS_TEXT_OCARINA_ACTION").unwrap();
        let raw = tokens(&["OCARINA_ACTION_TEACH_EPONA", "10", "20", "0x00B5"]);
        let mut params = Params::new(schema, &raw, 1, false).unwrap();
        let entry = TextEntry::OcarinaAction(TextOcarinaAction::from_params(&mut params).unwrap());

        let mut out = String::new();
        entry.write(&mut out, EmitOptions::default());
        assert_eq!(
            out.trim(),
            "CS_TEXT_OCARINA_ACTION(OCARINA_ACTION_TEACH_EPONA, 10, 20, 0x00B5),"
        );
    }
}
