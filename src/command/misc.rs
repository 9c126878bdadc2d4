//! Miscellaneous standalone and list-entry commands: misc effects, light
//! settings, time of day, rumble, transition, destination.

use crate::enums::EnumArg;
use crate::error::CsError;

use super::{write_cmd, EmitOptions, Params};

fn zeros(count: usize) -> impl Iterator<Item = String> {
    std::iter::repeat_with(|| "0".to_string()).take(count)
}

/// One `CS_MISC` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Misc {
    pub kind: EnumArg,
    pub start_frame: u16,
    pub end_frame: u16,
}

impl Misc {
    pub fn from_params(params: &mut Params) -> Result<Self, CsError> {
        let kind = params.enum_arg()?;
        let start_frame = params.u16()?;
        let end_frame = params.u16()?;
        for _ in 0..11 {
            params.unused()?;
        }
        Ok(Self {
            kind,
            start_frame,
            end_frame,
        })
    }

    pub fn write(&self, out: &mut String, opts: EmitOptions) {
        let mut args = vec![
            self.kind.emit(opts.use_macros),
            self.start_frame.to_string(),
            self.end_frame.to_string(),
        ];
        args.extend(zeros(11));
        write_cmd(out, 2, "CS_MISC", &args);
    }
}

/// One `CS_LIGHT_SETTING` entry. The value is 0-based here; the legacy
/// spelling stores it 1-based and is rebased at decode time.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSetting {
    pub light_setting: u8,
    pub start_frame: u16,
    pub end_frame: u16,
}

impl LightSetting {
    pub fn from_params(params: &mut Params) -> Result<Self, CsError> {
        let mut light_setting = params.u8()?;
        if params.is_legacy() {
            light_setting = light_setting.saturating_sub(1);
        }
        let start_frame = params.u16()?;
        let end_frame = params.u16()?;
        for _ in 0..8 {
            params.unused()?;
        }
        Ok(Self {
            light_setting,
            start_frame,
            end_frame,
        })
    }

    pub fn write(&self, out: &mut String, _opts: EmitOptions) {
        let mut args = vec![
            self.light_setting.to_string(),
            self.start_frame.to_string(),
            self.end_frame.to_string(),
        ];
        args.extend(zeros(8));
        write_cmd(out, 2, "CS_LIGHT_SETTING", &args);
    }
}

/// One `CS_TIME` entry (time of day over a frame interval).
#[derive(Debug, Clone, PartialEq)]
pub struct Time {
    pub start_frame: u16,
    pub end_frame: u16,
    pub hour: u8,
    pub minute: u8,
}

impl Time {
    pub fn from_params(params: &mut Params) -> Result<Self, CsError> {
        params.unused()?;
        Ok(Self {
            start_frame: params.u16()?,
            end_frame: params.u16()?,
            hour: params.u8()?,
            minute: params.u8()?,
        })
    }

    pub fn write(&self, out: &mut String, _opts: EmitOptions) {
        write_cmd(
            out,
            2,
            "CS_TIME",
            &[
                "0".to_string(),
                self.start_frame.to_string(),
                self.end_frame.to_string(),
                self.hour.to_string(),
                self.minute.to_string(),
            ],
        );
    }
}

/// One `CS_RUMBLE_CONTROLLER` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Rumble {
    pub start_frame: u16,
    pub end_frame: u16,
    pub source_strength: u8,
    pub duration: u8,
    pub decrease_rate: u8,
}

impl Rumble {
    pub fn from_params(params: &mut Params) -> Result<Self, CsError> {
        params.unused()?;
        let start_frame = params.u16()?;
        let end_frame = params.u16()?;
        let source_strength = params.u8()?;
        let duration = params.u8()?;
        let decrease_rate = params.u8()?;
        params.unused()?;
        params.unused()?;
        Ok(Self {
            start_frame,
            end_frame,
            source_strength,
            duration,
            decrease_rate,
        })
    }

    pub fn write(&self, out: &mut String, _opts: EmitOptions) {
        write_cmd(
            out,
            2,
            "CS_RUMBLE_CONTROLLER",
            &[
                "0".to_string(),
                self.start_frame.to_string(),
                self.end_frame.to_string(),
                self.source_strength.to_string(),
                self.duration.to_string(),
                self.decrease_rate.to_string(),
                "0".to_string(),
                "0".to_string(),
            ],
        );
    }
}

/// Standalone `CS_TRANSITION` command.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub kind: EnumArg,
    pub start_frame: u16,
    pub end_frame: u16,
}

impl Transition {
    pub fn from_params(params: &mut Params) -> Result<Self, CsError> {
        Ok(Self {
            kind: params.enum_arg()?,
            start_frame: params.u16()?,
            end_frame: params.u16()?,
        })
    }

    pub fn write(&self, out: &mut String, opts: EmitOptions) {
        write_cmd(
            out,
            1,
            "CS_TRANSITION",
            &[
                self.kind.emit(opts.use_macros),
                self.start_frame.to_string(),
                self.end_frame.to_string(),
            ],
        );
    }
}

/// Standalone `CS_DESTINATION` command; at most one per cutscene.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub id: EnumArg,
    pub start_frame: u16,
}

impl Destination {
    pub fn from_params(params: &mut Params) -> Result<Self, CsError> {
        let id = params.enum_arg()?;
        let start_frame = params.u16()?;
        params.unused()?;
        Ok(Self { id, start_frame })
    }

    pub fn write(&self, out: &mut String, opts: EmitOptions) {
        write_cmd(
            out,
            1,
            "CS_DESTINATION",
            &[
                self.id.emit(opts.use_macros),
                self.start_frame.to_string(),
                "0".to_string(),
            ],
        );
    }
}
