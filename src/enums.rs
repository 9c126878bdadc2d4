//! Enum identifier tables from the decomp headers.
//!
//! Enum-valued parameters may be spelled as a symbolic C identifier or as a
//! raw integer. Both resolve into the same [`EnumArg`]; tokens that resolve
//! to nothing are kept verbatim so that custom or unrecognized values round
//! trip losslessly.

#[derive(Debug, Clone, Copy)]
pub struct EnumItem {
    /// Full C identifier, e.g. `CS_TRANS_GRADUAL_WHITE`.
    pub id: &'static str,
    /// Short key used internally, e.g. `gradual_white`.
    pub key: &'static str,
    /// Numeric value in the engine.
    pub index: u32,
}

pub struct EnumTable {
    pub key: &'static str,
    pub items: &'static [EnumItem],
}

const fn item(id: &'static str, key: &'static str, index: u32) -> EnumItem {
    EnumItem { id, key, index }
}

static CS_CMD: &[EnumItem] = &[
    item("CS_CMD_PLAYER_CUE", "player_cue", 10),
    item("CS_CMD_ACTOR_CUE_0_0", "actor_cue_0_0", 15),
    item("CS_CMD_ACTOR_CUE_0_1", "actor_cue_0_1", 17),
    item("CS_CMD_ACTOR_CUE_0_2", "actor_cue_0_2", 18),
    item("CS_CMD_ACTOR_CUE_0_3", "actor_cue_0_3", 23),
    item("CS_CMD_ACTOR_CUE_0_4", "actor_cue_0_4", 34),
    item("CS_CMD_ACTOR_CUE_0_5", "actor_cue_0_5", 39),
    item("CS_CMD_ACTOR_CUE_0_6", "actor_cue_0_6", 46),
    item("CS_CMD_ACTOR_CUE_1_0", "actor_cue_1_0", 14),
    item("CS_CMD_ACTOR_CUE_2_0", "actor_cue_2_0", 16),
];

static CS_MISC_TYPE: &[EnumItem] = &[
    item("CS_MISC_RAIN", "rain", 1),
    item("CS_MISC_LIGHTNING", "lightning", 2),
    item("CS_MISC_SET_CSFLAG_0", "set_csflag_0", 3),
    item("CS_MISC_LIFT_FOG", "lift_fog", 4),
    item("CS_MISC_CLOUDY_SKY", "cloudy_sky", 5),
    item("CS_MISC_SET_LOCKED_VIEWPOINT", "set_locked_viewpoint", 6),
    item("CS_MISC_SHOW_TITLE_CARD", "show_title_card", 7),
    item("CS_MISC_QUAKE_START", "quake_start", 8),
    item("CS_MISC_QUAKE_STOP", "quake_stop", 9),
    item("CS_MISC_STOP_CUTSCENE", "stop_cutscene", 10),
];

static CS_TEXT_TYPE: &[EnumItem] = &[
    item("CS_TEXT_NORMAL", "normal", 0),
    item("CS_TEXT_CHOICE", "choice", 1),
    item("CS_TEXT_OCARINA_ACTION", "ocarina_action", 2),
];

static CS_TRANSITION_TYPE: &[EnumItem] = &[
    item("CS_TRANS_GRADUAL_WHITE", "gradual_white", 1),
    item("CS_TRANS_TRIGGER_INSTANCE", "trigger_instance", 2),
    item("CS_TRANS_INSTANT_WHITE", "instant_white", 3),
    item("CS_TRANS_GRADUAL_BLACK", "gradual_black", 4),
    item("CS_TRANS_INSTANT_BLACK", "instant_black", 5),
    item("CS_TRANS_FADE_FROM_HALF", "fade_from_half", 9),
    item("CS_TRANS_FADE_TO_HALF", "fade_to_half", 10),
    item("CS_TRANS_BLACK_FILL_IN", "black_fill_in", 11),
];

static CS_DESTINATION: &[EnumItem] = &[
    item("CS_DEST_CUTSCENE_MAP_GANON_HORSE", "cutscene_map_ganon_horse", 1),
    item("CS_DEST_CUTSCENE_MAP_THREE_GODDESSES", "cutscene_map_three_goddesses", 2),
    item("CS_DEST_GERUDO_VALLEY_DIN", "gerudo_valley_din", 3),
    item("CS_DEST_DEATH_MOUNTAIN_TRAIL_NAYRU", "death_mountain_trail_nayru", 4),
    item("CS_DEST_KOKIRI_FOREST_FARORE", "kokiri_forest_farore", 5),
    item("CS_DEST_TEMPLE_OF_TIME_FROM_CREDITS", "temple_of_time_from_credits", 6),
    item("CS_DEST_JABU_JABU", "jabu_jabu", 7),
    item("CS_DEST_CHAMBER_OF_SAGES", "chamber_of_sages", 8),
];

static CS_FADE_OUT_SEQ_PLAYER: &[EnumItem] = &[
    item("CS_FADE_OUT_FANFARE", "fanfare", 3),
    item("CS_FADE_OUT_BGM_MAIN", "bgm_main", 4),
];

static OCARINA_SONG_ACTION: &[EnumItem] = &[
    item("OCARINA_ACTION_TEACH_MINUET", "teach_minuet", 1),
    item("OCARINA_ACTION_TEACH_BOLERO", "teach_bolero", 2),
    item("OCARINA_ACTION_TEACH_SERENADE", "teach_serenade", 3),
    item("OCARINA_ACTION_TEACH_REQUIEM", "teach_requiem", 4),
    item("OCARINA_ACTION_TEACH_NOCTURNE", "teach_nocturne", 5),
    item("OCARINA_ACTION_TEACH_PRELUDE", "teach_prelude", 6),
    item("OCARINA_ACTION_TEACH_SARIA", "teach_saria", 7),
    item("OCARINA_ACTION_TEACH_EPONA", "teach_epona", 8),
    item("OCARINA_ACTION_TEACH_LULLABY", "teach_lullaby", 9),
    item("OCARINA_ACTION_TEACH_SUNS", "teach_suns", 10),
    item("OCARINA_ACTION_TEACH_TIME", "teach_time", 11),
    item("OCARINA_ACTION_TEACH_STORMS", "teach_storms", 12),
];

static SEQ_ID: &[EnumItem] = &[
    item("NA_BGM_GENERAL_SFX", "general_sfx", 0),
    item("NA_BGM_NATURE_AMBIENCE", "nature_ambience", 1),
    item("NA_BGM_FIELD_LOGIC", "field_logic", 2),
    item("NA_BGM_DUNGEON", "dungeon", 24),
    item("NA_BGM_KAKARIKO_ADULT", "kakariko_adult", 25),
    item("NA_BGM_BOSS", "boss", 27),
    item("NA_BGM_HORSE", "horse", 30),
    item("NA_BGM_ZORA_DOMAIN", "zora_domain", 40),
    item("NA_BGM_TEMPLE_OF_TIME", "temple_of_time", 58),
    item("NA_BGM_COURTYARD", "courtyard", 62),
    item("NA_BGM_OCARINA_EPONA", "ocarina_epona", 65),
    item("NA_BGM_OCARINA_SUNS", "ocarina_suns", 66),
    item("NA_BGM_OCARINA_TIME", "ocarina_time", 67),
    item("NA_BGM_OCARINA_STORM", "ocarina_storm", 68),
];

static PLAYER_CUE_ID: &[EnumItem] = &[
    item("PLAYER_CUEID_1", "player_cueid_1", 1),
    item("PLAYER_CUEID_2", "player_cueid_2", 2),
    item("PLAYER_CUEID_3", "player_cueid_3", 3),
    item("PLAYER_CUEID_4", "player_cueid_4", 4),
    item("PLAYER_CUEID_5", "player_cueid_5", 5),
    item("PLAYER_CUEID_6", "player_cueid_6", 6),
    item("PLAYER_CUEID_7", "player_cueid_7", 7),
    item("PLAYER_CUEID_8", "player_cueid_8", 8),
    item("PLAYER_CUEID_9", "player_cueid_9", 9),
    item("PLAYER_CUEID_10", "player_cueid_10", 10),
];

static TABLES: &[EnumTable] = &[
    EnumTable { key: "csCmd", items: CS_CMD },
    EnumTable { key: "csMiscType", items: CS_MISC_TYPE },
    EnumTable { key: "csTextType", items: CS_TEXT_TYPE },
    EnumTable { key: "csTransitionType", items: CS_TRANSITION_TYPE },
    EnumTable { key: "csDestination", items: CS_DESTINATION },
    EnumTable { key: "csFadeOutSeqPlayer", items: CS_FADE_OUT_SEQ_PLAYER },
    EnumTable { key: "ocarinaSongActionId", items: OCARINA_SONG_ACTION },
    EnumTable { key: "seqId", items: SEQ_ID },
    EnumTable { key: "csPlayerCueId", items: PLAYER_CUE_ID },
];

pub fn table(key: &str) -> Option<&'static EnumTable> {
    TABLES.iter().find(|table| table.key == key)
}

/// A decoded enum-valued parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumArg {
    /// Resolved against a table; stored by short key.
    Known {
        table: &'static str,
        key: &'static str,
    },
    /// Unrecognized token kept verbatim.
    Raw(String),
}

impl EnumArg {
    /// Resolves a raw token: first by C identifier, then by numeric index
    /// (legacy 1-based values are decremented before the index lookup).
    pub fn resolve(table_key: &'static str, token: &str, is_legacy: bool) -> Self {
        if let Some(table) = table(table_key) {
            if let Some(hit) = table.items.iter().find(|item| item.id == token) {
                return EnumArg::Known {
                    table: table_key,
                    key: hit.key,
                };
            }
            if let Ok(mut index) = parse_int(token) {
                if is_legacy {
                    index -= 1;
                }
                if index >= 0 {
                    if let Some(hit) = table.items.iter().find(|item| item.index == index as u32) {
                        return EnumArg::Known {
                            table: table_key,
                            key: hit.key,
                        };
                    }
                }
                // Legacy adjustment must survive even when the index is
                // unknown to the table.
                if is_legacy {
                    return EnumArg::Raw(index.to_string());
                }
            }
        }
        EnumArg::Raw(token.to_string())
    }

    /// Emits the value as command text: the C identifier in macro mode, the
    /// numeric index in raw mode, and the original token verbatim when the
    /// value never resolved.
    pub fn emit(&self, use_macros: bool) -> String {
        match self {
            EnumArg::Known { table: key, key: item_key } => {
                let hit = table(key)
                    .and_then(|table| table.items.iter().find(|item| item.key == *item_key));
                match hit {
                    Some(item) if use_macros => item.id.to_string(),
                    Some(item) => item.index.to_string(),
                    None => item_key.to_string(),
                }
            }
            EnumArg::Raw(token) => token.clone(),
        }
    }
}

fn parse_int(token: &str) -> Result<i64, std::num::ParseIntError> {
    if let Some(hex) = token.strip_prefix("0x") {
        i64::from_str_radix(hex, 16)
    } else {
        token.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolves_symbolic_and_numeric_to_the_same_value() {
        let by_id = EnumArg::resolve("csTransitionType", "CS_TRANS_GRADUAL_WHITE", false);
        let by_index = EnumArg::resolve("csTransitionType", "1", false);
        assert_eq!(by_id, by_index);
        assert_eq!(by_id.emit(true), "CS_TRANS_GRADUAL_WHITE");
        assert_eq!(by_id.emit(false), "1");
    }

    #[test]
    fn legacy_values_are_rebased_once() {
        // 1-based legacy value 2 refers to canonical index 1.
        let legacy = EnumArg::resolve("seqId", "2", true);
        let canonical = EnumArg::resolve("seqId", "1", false);
        assert_eq!(legacy, canonical);
    }

    #[test]
    fn unknown_tokens_round_trip_verbatim() {
        let arg = EnumArg::resolve("csMiscType", "CS_MISC_CUSTOM_THING", false);
        assert_eq!(arg, EnumArg::Raw("CS_MISC_CUSTOM_THING".into()));
        assert_eq!(arg.emit(true), "CS_MISC_CUSTOM_THING");
        assert_eq!(arg.emit(false), "CS_MISC_CUSTOM_THING");
    }
}
