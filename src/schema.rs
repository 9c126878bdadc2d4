//! Static command grammar table.
//!
//! Single source of truth for what each `CS_*` command's parameter list
//! means. Both the parser and the serializer go through this table, so the
//! two stay in lock-step: adding a command kind means adding one row here and
//! one variant in [`crate::command`], nothing else needs to know field order.

/// How a parameter token is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Decimal or `0x`-prefixed integer.
    Int,
    /// Same as [`ParamKind::Int`] but re-emitted in hexadecimal.
    Hex,
    /// Binary angle: hex, decimal degrees, or `DEG_TO_BINANG(...)`.
    Angle,
    /// `CS_CMD_CONTINUE`/`CS_CMD_STOP` or their raw `0`/`-1` spellings.
    ContinueFlag,
    /// Float literal with trailing `f`, or a raw 32-bit pattern decoding to
    /// the identical IEEE-754 value.
    IntOrFloat,
    /// Symbolic identifier resolved against the named enum table, or a raw
    /// integer resolved by index; unresolved tokens are kept verbatim.
    Enum(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    /// Bit width of the field in the engine's layout.
    pub bits: u32,
    pub signed: bool,
}

/// Whether a command opens a list, belongs to one, or stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandRole {
    ListHeader,
    ListEntry,
    Standalone,
}

#[derive(Debug)]
pub struct CommandSchema {
    pub name: &'static str,
    pub role: CommandRole,
    pub params: &'static [ParamSpec],
}

const fn p(name: &'static str, kind: ParamKind, bits: u32, signed: bool) -> ParamSpec {
    ParamSpec {
        name,
        kind,
        bits,
        signed,
    }
}

const UNUSED: ParamSpec = p("unused", ParamKind::Int, 32, true);
const START_FRAME: ParamSpec = p("startFrame", ParamKind::Int, 16, false);
const END_FRAME: ParamSpec = p("endFrame", ParamKind::Int, 16, false);
const ENTRY_TOTAL: ParamSpec = p("entryTotal", ParamKind::Int, 32, false);

static COMMANDS: &[CommandSchema] = &[
    CommandSchema {
        name: "CS_BEGIN_CUTSCENE",
        role: CommandRole::Standalone,
        params: &[p("totalEntries", ParamKind::Int, 32, true), p("frameCount", ParamKind::Int, 32, true)],
    },
    CommandSchema {
        name: "CS_END",
        role: CommandRole::Standalone,
        params: &[],
    },
    CommandSchema {
        name: "CS_ACTOR_CUE_LIST",
        role: CommandRole::ListHeader,
        params: &[p("commandType", ParamKind::Enum("csCmd"), 16, false), ENTRY_TOTAL],
    },
    CommandSchema {
        name: "CS_PLAYER_CUE_LIST",
        role: CommandRole::ListHeader,
        params: &[ENTRY_TOTAL],
    },
    CommandSchema {
        name: "CS_ACTOR_CUE",
        role: CommandRole::ListEntry,
        params: &[
            p("actionID", ParamKind::Hex, 16, false),
            START_FRAME,
            END_FRAME,
            p("rotX", ParamKind::Angle, 16, false),
            p("rotY", ParamKind::Angle, 16, false),
            p("rotZ", ParamKind::Angle, 16, false),
            p("startX", ParamKind::Int, 32, true),
            p("startY", ParamKind::Int, 32, true),
            p("startZ", ParamKind::Int, 32, true),
            p("endX", ParamKind::Int, 32, true),
            p("endY", ParamKind::Int, 32, true),
            p("endZ", ParamKind::Int, 32, true),
            p("normX", ParamKind::IntOrFloat, 32, true),
            p("normY", ParamKind::IntOrFloat, 32, true),
            p("normZ", ParamKind::IntOrFloat, 32, true),
        ],
    },
    CommandSchema {
        name: "CS_PLAYER_CUE",
        role: CommandRole::ListEntry,
        params: &[
            p("actionID", ParamKind::Enum("csPlayerCueId"), 16, false),
            START_FRAME,
            END_FRAME,
            p("rotX", ParamKind::Angle, 16, false),
            p("rotY", ParamKind::Angle, 16, false),
            p("rotZ", ParamKind::Angle, 16, false),
            p("startX", ParamKind::Int, 32, true),
            p("startY", ParamKind::Int, 32, true),
            p("startZ", ParamKind::Int, 32, true),
            p("endX", ParamKind::Int, 32, true),
            p("endY", ParamKind::Int, 32, true),
            p("endZ", ParamKind::Int, 32, true),
            p("normX", ParamKind::IntOrFloat, 32, true),
            p("normY", ParamKind::IntOrFloat, 32, true),
            p("normZ", ParamKind::IntOrFloat, 32, true),
        ],
    },
    CommandSchema {
        name: "CS_CAM_EYE_SPLINE",
        role: CommandRole::ListHeader,
        params: &[START_FRAME, END_FRAME],
    },
    CommandSchema {
        name: "CS_CAM_AT_SPLINE",
        role: CommandRole::ListHeader,
        params: &[START_FRAME, END_FRAME],
    },
    CommandSchema {
        name: "CS_CAM_EYE_SPLINE_REL_TO_PLAYER",
        role: CommandRole::ListHeader,
        params: &[START_FRAME, END_FRAME],
    },
    CommandSchema {
        name: "CS_CAM_AT_SPLINE_REL_TO_PLAYER",
        role: CommandRole::ListHeader,
        params: &[START_FRAME, END_FRAME],
    },
    CommandSchema {
        name: "CS_CAM_EYE",
        role: CommandRole::ListHeader,
        params: &[START_FRAME, END_FRAME],
    },
    CommandSchema {
        name: "CS_CAM_AT",
        role: CommandRole::ListHeader,
        params: &[START_FRAME, END_FRAME],
    },
    CommandSchema {
        name: "CS_CAM_POINT",
        role: CommandRole::ListEntry,
        params: &[
            p("continueFlag", ParamKind::ContinueFlag, 8, true),
            p("camRoll", ParamKind::Int, 8, true),
            p("frame", ParamKind::Int, 16, false),
            p("viewAngle", ParamKind::IntOrFloat, 32, true),
            p("xPos", ParamKind::Int, 16, true),
            p("yPos", ParamKind::Int, 16, true),
            p("zPos", ParamKind::Int, 16, true),
            UNUSED,
        ],
    },
    CommandSchema {
        name: "CS_MISC_LIST",
        role: CommandRole::ListHeader,
        params: &[ENTRY_TOTAL],
    },
    CommandSchema {
        name: "CS_MISC",
        role: CommandRole::ListEntry,
        params: &[
            p("type", ParamKind::Enum("csMiscType"), 16, false),
            START_FRAME,
            END_FRAME,
            UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED,
        ],
    },
    CommandSchema {
        name: "CS_LIGHT_SETTING_LIST",
        role: CommandRole::ListHeader,
        params: &[ENTRY_TOTAL],
    },
    CommandSchema {
        name: "CS_LIGHT_SETTING",
        role: CommandRole::ListEntry,
        params: &[
            p("lightSetting", ParamKind::Int, 8, false),
            START_FRAME,
            END_FRAME,
            UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED,
        ],
    },
    CommandSchema {
        name: "CS_TRANSITION",
        role: CommandRole::Standalone,
        params: &[p("type", ParamKind::Enum("csTransitionType"), 16, false), START_FRAME, END_FRAME],
    },
    CommandSchema {
        name: "CS_TEXT_LIST",
        role: CommandRole::ListHeader,
        params: &[ENTRY_TOTAL],
    },
    CommandSchema {
        name: "CS_TEXT",
        role: CommandRole::ListEntry,
        params: &[
            p("textId", ParamKind::Hex, 16, false),
            START_FRAME,
            END_FRAME,
            p("type", ParamKind::Enum("csTextType"), 8, false),
            p("altTextId1", ParamKind::Hex, 16, false),
            p("altTextId2", ParamKind::Hex, 16, false),
        ],
    },
    CommandSchema {
        name: "CS_TEXT_NONE",
        role: CommandRole::ListEntry,
        params: &[START_FRAME, END_FRAME],
    },
    CommandSchema {
        name: "CS_TEXT_OCARINA_ACTION",
        role: CommandRole::ListEntry,
        params: &[
            p("ocarinaActionId", ParamKind::Enum("ocarinaSongActionId"), 16, false),
            START_FRAME,
            END_FRAME,
            p("messageId", ParamKind::Hex, 16, false),
        ],
    },
    CommandSchema {
        name: "CS_TIME_LIST",
        role: CommandRole::ListHeader,
        params: &[ENTRY_TOTAL],
    },
    CommandSchema {
        name: "CS_TIME",
        role: CommandRole::ListEntry,
        params: &[
            UNUSED,
            START_FRAME,
            END_FRAME,
            p("hour", ParamKind::Int, 8, false),
            p("minute", ParamKind::Int, 8, false),
        ],
    },
    CommandSchema {
        name: "CS_START_SEQ_LIST",
        role: CommandRole::ListHeader,
        params: &[ENTRY_TOTAL],
    },
    CommandSchema {
        name: "CS_STOP_SEQ_LIST",
        role: CommandRole::ListHeader,
        params: &[ENTRY_TOTAL],
    },
    CommandSchema {
        name: "CS_START_SEQ",
        role: CommandRole::ListEntry,
        params: &[
            p("seqId", ParamKind::Enum("seqId"), 16, false),
            START_FRAME,
            END_FRAME,
            UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED,
        ],
    },
    CommandSchema {
        name: "CS_STOP_SEQ",
        role: CommandRole::ListEntry,
        params: &[
            p("seqId", ParamKind::Enum("seqId"), 16, false),
            START_FRAME,
            END_FRAME,
            UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED,
        ],
    },
    CommandSchema {
        name: "CS_FADE_OUT_SEQ_LIST",
        role: CommandRole::ListHeader,
        params: &[ENTRY_TOTAL],
    },
    CommandSchema {
        name: "CS_FADE_OUT_SEQ",
        role: CommandRole::ListEntry,
        params: &[
            p("seqPlayer", ParamKind::Enum("csFadeOutSeqPlayer"), 16, false),
            START_FRAME,
            END_FRAME,
            UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED,
        ],
    },
    CommandSchema {
        name: "CS_RUMBLE_CONTROLLER_LIST",
        role: CommandRole::ListHeader,
        params: &[ENTRY_TOTAL],
    },
    CommandSchema {
        name: "CS_RUMBLE_CONTROLLER",
        role: CommandRole::ListEntry,
        params: &[
            UNUSED,
            START_FRAME,
            END_FRAME,
            p("sourceStrength", ParamKind::Int, 8, false),
            p("duration", ParamKind::Int, 8, false),
            p("decreaseRate", ParamKind::Int, 8, false),
            UNUSED,
            UNUSED,
        ],
    },
    CommandSchema {
        name: "CS_DESTINATION",
        role: CommandRole::Standalone,
        params: &[
            p("destination", ParamKind::Enum("csDestination"), 16, false),
            START_FRAME,
            UNUSED,
        ],
    },
];

/// Returns the schema of a canonical command name.
pub fn lookup(name: &str) -> Option<&'static CommandSchema> {
    COMMANDS.iter().find(|schema| schema.name == name)
}

/// Rename table carried over from older decomp revisions. Names prefixed
/// with `L_` mark entries whose first argument is 1-based in the legacy
/// grammar; the parser strips the prefix and decrements the value at decode
/// time.
pub static LEGACY_RENAMES: &[(&str, &str)] = &[
    ("CS_CAM_POS_LIST", "CS_CAM_EYE_SPLINE"),
    ("CS_CAM_FOCUS_POINT_LIST", "CS_CAM_AT_SPLINE"),
    ("CS_CAM_POS_PLAYER_LIST", "CS_CAM_EYE_SPLINE_REL_TO_PLAYER"),
    ("CS_CAM_FOCUS_POINT_PLAYER_LIST", "CS_CAM_AT_SPLINE_REL_TO_PLAYER"),
    ("CS_NPC_ACTION_LIST", "CS_ACTOR_CUE_LIST"),
    ("CS_PLAYER_ACTION_LIST", "CS_PLAYER_CUE_LIST"),
    ("CS_CMD_07", "CS_CAM_EYE"),
    ("CS_CMD_08", "CS_CAM_AT"),
    ("CS_CAM_POS", "CS_CAM_POINT"),
    ("CS_CAM_FOCUS_POINT", "CS_CAM_POINT"),
    ("CS_CAM_POS_PLAYER", "CS_CAM_POINT"),
    ("CS_CAM_FOCUS_POINT_PLAYER", "CS_CAM_POINT"),
    ("CS_NPC_ACTION", "CS_ACTOR_CUE"),
    ("CS_PLAYER_ACTION", "CS_PLAYER_CUE"),
    ("CS_CMD_09_LIST", "CS_RUMBLE_CONTROLLER_LIST"),
    ("CS_CMD_09", "CS_RUMBLE_CONTROLLER"),
    ("CS_TEXT_DISPLAY_TEXTBOX", "CS_TEXT"),
    ("CS_TEXT_LEARN_SONG", "CS_TEXT_OCARINA_ACTION"),
    ("CS_SCENE_TRANS_FX", "CS_TRANSITION"),
    ("CS_FADE_BGM_LIST", "CS_FADE_OUT_SEQ_LIST"),
    ("CS_FADE_BGM", "CS_FADE_OUT_SEQ"),
    ("CS_TERMINATOR", "CS_DESTINATION"),
    ("CS_LIGHTING_LIST", "CS_LIGHT_SETTING_LIST"),
    ("CS_LIGHTING", "L_CS_LIGHT_SETTING"),
    ("CS_PLAY_BGM_LIST", "CS_START_SEQ_LIST"),
    ("CS_PLAY_BGM", "L_CS_START_SEQ"),
    ("CS_STOP_BGM_LIST", "CS_STOP_SEQ_LIST"),
    ("CS_STOP_BGM", "L_CS_STOP_SEQ"),
    ("CS_HEADER", "CS_BEGIN_CUTSCENE"),
    ("CS_END_OF_SCRIPT", "CS_END"),
];
