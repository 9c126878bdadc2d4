//! Typed command objects.
//!
//! Each `CS_*` command decodes into a small struct via a [`Params`] cursor
//! that walks the command's grammar row, range-checking every token. The
//! same structs know how to re-emit themselves as command text.

mod actor_cue;
mod camera;
mod misc;
mod seq;
mod text;

pub use actor_cue::{ActorCue, ActorCueList, CueId};
pub use camera::{CamList, CamListKind, CamPoint};
pub use misc::{Destination, LightSetting, Misc, Rumble, Time, Transition};
pub use seq::{FadeOutSeq, Seq};
pub use text::{Text, TextEntry, TextOcarinaAction};

use crate::codec::{self, ContinueFlag};
use crate::enums::EnumArg;
use crate::error::CsError;
use crate::schema::{CommandSchema, ParamKind};

/// One indentation level, matching the C formatting conventions.
pub const INDENT: &str = "    ";

/// Serializer switches shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct EmitOptions {
    /// Emit symbolic macros (`CS_CMD_STOP`, `DEG_TO_BINANG(...)`, enum
    /// identifiers) instead of raw numbers.
    pub use_macros: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { use_macros: true }
    }
}

/// Appends one command line at the given indent depth.
pub fn write_cmd(out: &mut String, depth: usize, name: &str, args: &[String]) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(name);
    out.push('(');
    out.push_str(&args.join(", "));
    out.push_str("),\n");
}

/// Cursor over one command's argument tokens, typed by the grammar row.
/// Every getter consumes one parameter and validates it against the
/// corresponding [`crate::schema::ParamSpec`].
#[derive(Debug)]
pub struct Params<'a> {
    schema: &'static CommandSchema,
    tokens: &'a [String],
    index: usize,
    line: usize,
    /// Decrement 1-based values at the legacy positions.
    legacy: bool,
}

impl<'a> Params<'a> {
    pub fn new(
        schema: &'static CommandSchema,
        tokens: &'a [String],
        line: usize,
        legacy: bool,
    ) -> Result<Self, CsError> {
        // CS_TIME grew a sixth padding argument in an older revision; it
        // carries nothing and is tolerated rather than rejected.
        let tolerated = schema.name == "CS_TIME" && tokens.len() == schema.params.len() + 1;
        if tokens.len() != schema.params.len() && !tolerated {
            return Err(CsError::schema(
                schema.name,
                format!(
                    "expected {} parameters, found {}",
                    schema.params.len(),
                    tokens.len()
                ),
                line,
            ));
        }
        Ok(Self {
            schema,
            tokens,
            index: 0,
            line,
            legacy,
        })
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy
    }

    fn next(&mut self, expected: &str) -> Result<(&'static str, ParamKind, u32, bool, &'a str), CsError> {
        let spec = self.schema.params.get(self.index).ok_or_else(|| {
            CsError::schema(
                self.schema.name,
                format!("grammar row exhausted while reading `{expected}`"),
                self.line,
            )
        })?;
        let token = &self.tokens[self.index];
        self.index += 1;
        Ok((spec.name, spec.kind, spec.bits, spec.signed, token))
    }

    fn range_err(&self, field: &str, raw: &str, message: String) -> CsError {
        CsError::range(self.schema.name, field, raw, message, self.line)
    }

    /// Plain or hex integer, checked against the field width.
    pub fn int(&mut self) -> Result<i64, CsError> {
        let (field, _, bits, signed, token) = self.next("int")?;
        let value = codec::parse_int(token)
            .map_err(|message| self.range_err(field, token, message))?;
        if !codec::fits(value, bits, signed) {
            return Err(self.range_err(
                field,
                token,
                format!("does not fit {}{} bits", if signed { "i" } else { "u" }, bits),
            ));
        }
        Ok(value)
    }

    pub fn u8(&mut self) -> Result<u8, CsError> {
        Ok(self.int()? as u8)
    }

    pub fn u16(&mut self) -> Result<u16, CsError> {
        Ok(self.int()? as u16)
    }

    pub fn i8(&mut self) -> Result<i8, CsError> {
        Ok(self.int()? as i8)
    }

    pub fn i16(&mut self) -> Result<i16, CsError> {
        Ok(self.int()? as i16)
    }

    pub fn i32(&mut self) -> Result<i32, CsError> {
        Ok(self.int()? as i32)
    }

    /// Consumes a padding slot, value ignored.
    pub fn unused(&mut self) -> Result<(), CsError> {
        self.int().map(|_| ())
    }

    pub fn angle(&mut self) -> Result<i16, CsError> {
        let (field, _, _, _, token) = self.next("angle")?;
        codec::parse_angle(token).map_err(|message| self.range_err(field, token, message))
    }

    pub fn continue_flag(&mut self) -> Result<ContinueFlag, CsError> {
        let (field, _, _, _, token) = self.next("continue flag")?;
        ContinueFlag::parse(token).map_err(|message| self.range_err(field, token, message))
    }

    pub fn float(&mut self) -> Result<f32, CsError> {
        let (field, _, _, _, token) = self.next("float")?;
        codec::parse_int_or_float(token).map_err(|message| self.range_err(field, token, message))
    }

    pub fn enum_arg(&mut self) -> Result<EnumArg, CsError> {
        let (field, kind, _, _, token) = self.next("enum")?;
        let table = match kind {
            ParamKind::Enum(table) => table,
            _ => {
                return Err(CsError::schema(
                    self.schema.name,
                    format!("`{field}` is not an enum field"),
                    self.line,
                ))
            }
        };
        Ok(EnumArg::resolve(table, token, self.legacy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn cursor_rejects_wrong_arity() {
        let schema = schema::lookup("CS_TRANSITION").unwrap();
        let err = Params::new(schema, &tokens(&["1", "2"]), 7, false).unwrap_err();
        assert!(matches!(err, CsError::Schema { line: 7, .. }));
    }

    #[test]
    fn cursor_tolerates_the_padded_time_form() {
        let schema = schema::lookup("CS_TIME").unwrap();
        assert!(Params::new(schema, &tokens(&["0", "0", "10", "6", "30", "0"]), 1, false).is_ok());
        assert!(Params::new(schema, &tokens(&["0", "0", "10", "6", "30"]), 1, false).is_ok());
    }

    #[test]
    fn out_of_range_values_name_the_field() {
        let schema = schema::lookup("CS_CAM_POINT").unwrap();
        let args = tokens(&["CS_CMD_CONTINUE", "999", "30", "60.0f", "0", "0", "0", "0"]);
        let mut params = Params::new(schema, &args, 3, false).unwrap();
        params.continue_flag().unwrap();
        let err = params.int().unwrap_err();
        match err {
            CsError::Range { field, .. } => assert_eq!(field, "camRoll"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn write_cmd_indents_per_depth() {
        let mut out = String::new();
        write_cmd(&mut out, 2, "CS_CAM_POINT", &["0".into(), "1".into()]);
        assert_eq!(out, "        CS_CAM_POINT(0, 1),\n");
    }
}
