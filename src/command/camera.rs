//! Camera list commands and their shared point entry.

use crate::codec::{emit_float, ContinueFlag};
use crate::error::CsError;

use super::{write_cmd, EmitOptions, Params};

/// One `CS_CAM_POINT` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CamPoint {
    pub continue_flag: ContinueFlag,
    pub cam_roll: i8,
    pub frame: u16,
    pub view_angle: f32,
    pub pos: [i16; 3],
}

impl CamPoint {
    /// The trailing stop entry appended to every emitted list. The engine
    /// never reads past it, so all of its payload fields are zero.
    pub fn sentinel() -> Self {
        Self {
            continue_flag: ContinueFlag::Stop,
            cam_roll: 0,
            frame: 0,
            view_angle: 0.0,
            pos: [0, 0, 0],
        }
    }

    pub fn from_params(params: &mut Params) -> Result<Self, CsError> {
        let continue_flag = params.continue_flag()?;
        let cam_roll = params.i8()?;
        let frame = params.u16()?;
        let view_angle = params.float()?;
        let pos = [params.i16()?, params.i16()?, params.i16()?];
        params.unused()?;
        Ok(Self {
            continue_flag,
            cam_roll,
            frame,
            view_angle,
            pos,
        })
    }

    pub fn write(&self, out: &mut String, opts: EmitOptions) {
        write_cmd(
            out,
            2,
            "CS_CAM_POINT",
            &[
                self.continue_flag.emit(opts.use_macros).to_string(),
                self.cam_roll.to_string(),
                self.frame.to_string(),
                emit_float(self.view_angle),
                self.pos[0].to_string(),
                self.pos[1].to_string(),
                self.pos[2].to_string(),
                "0".to_string(),
            ],
        );
    }
}

/// Which of the six camera list headers opened the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CamListKind {
    EyeSpline,
    AtSpline,
    EyeSplineRelToPlayer,
    AtSplineRelToPlayer,
    Eye,
    At,
}

impl CamListKind {
    pub fn from_command(name: &str) -> Option<Self> {
        Some(match name {
            "CS_CAM_EYE_SPLINE" => Self::EyeSpline,
            "CS_CAM_AT_SPLINE" => Self::AtSpline,
            "CS_CAM_EYE_SPLINE_REL_TO_PLAYER" => Self::EyeSplineRelToPlayer,
            "CS_CAM_AT_SPLINE_REL_TO_PLAYER" => Self::AtSplineRelToPlayer,
            "CS_CAM_EYE" => Self::Eye,
            "CS_CAM_AT" => Self::At,
            _ => return None,
        })
    }

    pub fn command_name(self) -> &'static str {
        match self {
            Self::EyeSpline => "CS_CAM_EYE_SPLINE",
            Self::AtSpline => "CS_CAM_AT_SPLINE",
            Self::EyeSplineRelToPlayer => "CS_CAM_EYE_SPLINE_REL_TO_PLAYER",
            Self::AtSplineRelToPlayer => "CS_CAM_AT_SPLINE_REL_TO_PLAYER",
            Self::Eye => "CS_CAM_EYE",
            Self::At => "CS_CAM_AT",
        }
    }

    pub fn is_eye(self) -> bool {
        matches!(self, Self::EyeSpline | Self::EyeSplineRelToPlayer | Self::Eye)
    }

    /// The AT-side kind this eye-side kind pairs with during validation.
    pub fn at_counterpart(self) -> Self {
        match self {
            Self::EyeSpline => Self::AtSpline,
            Self::EyeSplineRelToPlayer => Self::AtSplineRelToPlayer,
            Self::Eye => Self::At,
            other => other,
        }
    }
}

/// A camera list header plus its collected points, sentinel already
/// stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct CamList {
    pub kind: CamListKind,
    pub start_frame: u16,
    pub end_frame: u16,
    pub points: Vec<CamPoint>,
}

impl CamList {
    pub fn from_params(kind: CamListKind, params: &mut Params) -> Result<Self, CsError> {
        Ok(Self {
            kind,
            start_frame: params.u16()?,
            end_frame: params.u16()?,
            points: Vec::new(),
        })
    }

    pub fn write(&self, out: &mut String, opts: EmitOptions) {
        write_cmd(
            out,
            1,
            self.kind.command_name(),
            &[self.start_frame.to_string(), self.end_frame.to_string()],
        );
        for point in &self.points {
            point.write(out, opts);
        }
        // Lists too short to interpolate carry no stop point; the parser
        // only strips a sentinel past 4 points, so emitting one here would
        // grow the list on every reparse.
        if self.points.len() >= 4 {
            CamPoint::sentinel().write(out, opts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use pretty_assertions::assert_eq;

    fn point_tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn cam_point_decodes_and_reencodes() {
        let schema = schema::lookup("CS_CAM_POINT").unwrap();
        let tokens = point_tokens(&["CS_CMD_CONTINUE", "3", "30", "60.0f", "10", "-20", "30", "0"]);
        let mut params = Params::new(schema, &tokens, 1, false).unwrap();
        let point = CamPoint::from_params(&mut params).unwrap();
        assert_eq!(point.cam_roll, 3);
        assert_eq!(point.pos, [10, -20, 30]);

        let mut out = String::new();
        point.write(&mut out, EmitOptions::default());
        assert_eq!(
            out,
            "        CS_CAM_POINT(CS_CMD_CONTINUE, 3, 30, 60.0f, 10, -20, 30, 0),\n"
        );
    }

    fn plain_point(x: i16) -> CamPoint {
        CamPoint {
            continue_flag: ContinueFlag::Continue,
            cam_roll: 0,
            frame: 30,
            view_angle: 45.0,
            pos: [x, 2, 3],
        }
    }

    #[test]
    fn cam_list_reappends_the_sentinel() {
        let list = CamList {
            kind: CamListKind::EyeSpline,
            start_frame: 0,
            end_frame: 0,
            points: (0..4).map(plain_point).collect(),
        };
        let mut out = String::new();
        list.write(&mut out, EmitOptions { use_macros: false });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5].trim(), "CS_CAM_POINT(-1, 0, 0, 0.0f, 0, 0, 0, 0),");
    }

    #[test]
    fn short_cam_list_gets_no_sentinel() {
        let list = CamList {
            kind: CamListKind::EyeSpline,
            start_frame: 0,
            end_frame: 0,
            points: (0..3).map(plain_point).collect(),
        };
        let mut out = String::new();
        list.write(&mut out, EmitOptions { use_macros: false });
        assert_eq!(out.lines().count(), 4);
        assert!(!out.contains("-1"));
    }

    #[test]
    fn eye_kinds_pair_with_their_at_kind() {
        assert_eq!(CamListKind::EyeSpline.at_counterpart(), CamListKind::AtSpline);
        assert!(CamListKind::EyeSpline.is_eye());
        assert!(!CamListKind::AtSpline.is_eye());
    }
}
