//! Value codecs shared by the parser and the serializer.
//!
//! Angles live in binary-angle units (0x10000 per full turn), positions in
//! engine space as signed 16-bit integers. The host side uses floats and a
//! Y-up-to-Z-up axis swap, so both directions of the conversion live here.

use glam::Vec3;

pub const BINANG_PER_TURN: f64 = 65536.0;

/// Wraps an arbitrary binary-angle value into the signed canonical range
/// `[-0x8000, 0x7FFF]`.
pub fn normalize_binang(value: i64) -> i16 {
    let wrapped = value.rem_euclid(0x10000);
    if wrapped >= 0x8000 {
        (wrapped - 0x10000) as i16
    } else {
        wrapped as i16
    }
}

pub fn binang_to_rad(raw: i16) -> f32 {
    (raw as f64 * std::f64::consts::TAU / BINANG_PER_TURN) as f32
}

pub fn binang_to_deg(raw: i16) -> f32 {
    (raw as f64 * 360.0 / BINANG_PER_TURN) as f32
}

pub fn deg_to_binang(degrees: f32) -> i16 {
    normalize_binang((degrees as f64 * BINANG_PER_TURN / 360.0).round() as i64)
}

/// Decodes an angle token: `DEG_TO_BINANG(...)`, a plain decimal degree
/// value, or a raw hex binary angle. Values wider than 16 bits saturate to
/// `0xFFFF` the way the original tooling did.
pub fn parse_angle(token: &str) -> Result<i16, String> {
    let token = token.trim();
    if let Some(inner) = token
        .strip_prefix("DEG_TO_BINANG(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let degrees: f32 = inner
            .trim()
            .trim_end_matches('f')
            .parse()
            .map_err(|_| format!("`{token}` is not a valid degree value"))?;
        return Ok(deg_to_binang(degrees));
    }
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        let raw = u32::from_str_radix(hex, 16)
            .map_err(|_| format!("`{token}` is not a valid hex angle"))?;
        let raw = raw.min(0xFFFF);
        return Ok(normalize_binang(raw as i64));
    }
    // Bare numbers are decimal degrees, matching the older grammar.
    let degrees: f32 = token
        .parse()
        .map_err(|_| format!("`{token}` is not a valid angle"))?;
    Ok(deg_to_binang(degrees))
}

/// Emits an angle either as a `DEG_TO_BINANG` macro call (three decimals) or
/// as the raw hex binary angle.
pub fn emit_angle(raw: i16, use_macros: bool) -> String {
    if use_macros {
        format!("DEG_TO_BINANG({:.3})", binang_to_deg(raw))
    } else {
        format!("0x{:04X}", raw as u16)
    }
}

/// List-entry continuation marker. `Stop` on a camera point terminates
/// spline interpolation at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueFlag {
    Continue,
    Stop,
}

impl ContinueFlag {
    pub fn parse(token: &str) -> Result<Self, String> {
        match token.trim() {
            "CS_CMD_CONTINUE" | "CS_CAM_CONTINUE" | "0" => Ok(ContinueFlag::Continue),
            "CS_CMD_STOP" | "CS_CAM_STOP" | "-1" => Ok(ContinueFlag::Stop),
            other => Err(format!("`{other}` is not a continuation flag")),
        }
    }

    pub fn emit(self, use_macros: bool) -> &'static str {
        match (self, use_macros) {
            (ContinueFlag::Continue, true) => "CS_CMD_CONTINUE",
            (ContinueFlag::Continue, false) => "0",
            (ContinueFlag::Stop, true) => "CS_CMD_STOP",
            (ContinueFlag::Stop, false) => "-1",
        }
    }
}

/// Decodes a plain integer token, decimal or `0x`-prefixed.
pub fn parse_int(token: &str) -> Result<i64, String> {
    let token = token.trim();
    let (digits, negative) = match token.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    let magnitude = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)
    } else {
        digits.parse()
    }
    .map_err(|_| format!("`{token}` is not a valid integer"))?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Whether `value` fits the declared field width.
pub fn fits(value: i64, bits: u32, signed: bool) -> bool {
    if signed {
        let half = 1i64 << (bits - 1);
        (-half..half).contains(&value)
    } else {
        // Unsigned fields still accept the signed spellings the original
        // scripts use (e.g. `-1` in a u16 slot).
        let half = 1i64 << (bits - 1);
        value >= -half && value < (1i64 << bits)
    }
}

/// Decodes a token that is either a float literal (trailing `f`) or a raw
/// 32-bit integer holding the same IEEE-754 pattern.
pub fn parse_int_or_float(token: &str) -> Result<f32, String> {
    let token = token.trim();
    if let Some(lit) = token.strip_suffix('f') {
        return lit
            .parse()
            .map_err(|_| format!("`{token}` is not a valid float literal"));
    }
    if token.contains('.') {
        return token
            .parse()
            .map_err(|_| format!("`{token}` is not a valid float literal"));
    }
    let raw = parse_int(token)?;
    if !(0..=u32::MAX as i64).contains(&raw) {
        return Err(format!("`{token}` does not fit a 32-bit float pattern"));
    }
    Ok(f32::from_bits(raw as u32))
}

pub fn emit_float(value: f32) -> String {
    if !value.is_finite() {
        // NaN and infinity have no literal spelling the parser accepts;
        // keep the bit pattern instead.
        format!("0x{:08X}", value.to_bits())
    } else if value == value.trunc() && value.abs() < 1.0e7 {
        format!("{:.1}f", value)
    } else {
        format!("{}f", value)
    }
}

/// Engine-space position, always integral and 16-bit.
pub type EnginePos = [i16; 3];

/// Converts a host-space point to engine space. Host is Z-up, the engine is
/// Y-up, so the axes swap as `(x, y, z) -> (x, z, -y)`. Out-of-range
/// components are a hard failure, never clamped.
pub fn engine_from_host(point: Vec3, scale: f32) -> Result<EnginePos, String> {
    let scaled = [
        (point.x * scale).round(),
        (point.z * scale).round(),
        (-point.y * scale).round(),
    ];
    let mut out = [0i16; 3];
    for (slot, value) in out.iter_mut().zip(scaled) {
        if !(i16::MIN as f32..=i16::MAX as f32).contains(&value) {
            return Err(format!(
                "position component {value} exceeds the signed 16-bit range"
            ));
        }
        *slot = value as i16;
    }
    Ok(out)
}

/// Inverse of [`engine_from_host`].
pub fn host_from_engine(pos: EnginePos, scale: f32) -> Vec3 {
    Vec3::new(
        pos[0] as f32 / scale,
        -pos[2] as f32 / scale,
        pos[1] as f32 / scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn binang_normalization_wraps_into_signed_range() {
        assert_eq!(normalize_binang(0x8000), -0x8000);
        assert_eq!(normalize_binang(0xFFFF), -1);
        assert_eq!(normalize_binang(0x10000), 0);
        assert_eq!(normalize_binang(-0x10001), -1);
        assert_eq!(normalize_binang(0x7FFF), 0x7FFF);
    }

    #[test]
    fn angle_tokens_decode_to_the_same_binang() {
        assert_eq!(parse_angle("DEG_TO_BINANG(90.0)").unwrap(), 0x4000);
        assert_eq!(parse_angle("90").unwrap(), 0x4000);
        assert_eq!(parse_angle("0x4000").unwrap(), 0x4000);
        // Oversized hex saturates before normalization.
        assert_eq!(parse_angle("0x12345").unwrap(), -1);
    }

    #[test]
    fn angle_emission_round_trips() {
        for raw in [0i16, 0x4000, -0x4000, 0x7FFF, -0x8000] {
            assert_eq!(parse_angle(&emit_angle(raw, false)).unwrap(), raw);
        }
        assert_eq!(emit_angle(0x2000, true), "DEG_TO_BINANG(45.000)");
    }

    #[test]
    fn int_or_float_accepts_both_spellings() {
        assert_eq!(parse_int_or_float("1.5f").unwrap(), 1.5);
        // 0x3FC00000 is the bit pattern of 1.5f.
        assert_eq!(parse_int_or_float("0x3FC00000").unwrap(), 1.5);
        assert_eq!(parse_int_or_float("0").unwrap(), 0.0);
        assert_eq!(emit_float(1.5), "1.5f");
        assert_eq!(emit_float(0.0), "0.0f");
    }

    #[test]
    fn non_finite_floats_emit_their_bit_pattern() {
        let nan = f32::from_bits(0x7FC00000);
        assert_eq!(emit_float(nan), "0x7FC00000");
        assert!(parse_int_or_float(&emit_float(nan)).unwrap().is_nan());

        assert_eq!(emit_float(f32::INFINITY), "0x7F800000");
        assert_eq!(
            parse_int_or_float(&emit_float(f32::NEG_INFINITY)).unwrap(),
            f32::NEG_INFINITY
        );
    }

    #[test]
    fn positions_swap_axes_and_round_trip() {
        let host = Vec3::new(1.0, 2.0, 3.0);
        let engine = engine_from_host(host, 10.0).unwrap();
        assert_eq!(engine, [10, 30, -20]);
        assert_eq!(host_from_engine(engine, 10.0), host);
    }

    #[test]
    fn out_of_range_positions_fail_hard() {
        let host = Vec3::new(40000.0, 0.0, 0.0);
        assert!(engine_from_host(host, 1.0).is_err());
    }
}
