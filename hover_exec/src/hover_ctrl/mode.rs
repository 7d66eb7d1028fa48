//! Operator-controlled mode state and its persistence encoding

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::DEFAULT_TARGET_HEIGHT_M;
use veh_if::tc::Tc;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Delimiter between the fields of the persisted storage blob.
const STORAGE_DELIMITER: char = ';';

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The operator-controlled scalars gating and parameterising hover control.
///
/// Mutated only through `apply_tc` (discrete commands), the per-cycle
/// clamp/manual-adjust step in HoverCtrl's processing, or `decode` at
/// startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeState {
    /// True if hover mode is active.
    pub hover_enabled: bool,

    /// True if the continuous manual height adjustment input is applied.
    pub manual_adjust: bool,

    /// The target levitation height above the reference surface.
    ///
    /// Units: meters
    pub target_height_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ModeState {
    fn default() -> Self {
        ModeState {
            hover_enabled: false,
            manual_adjust: false,
            target_height_m: DEFAULT_TARGET_HEIGHT_M,
        }
    }
}

impl ModeState {
    /// Apply a telecommand, returning the new state.
    ///
    /// A pure transition - the parse has already succeeded by the time a `Tc`
    /// exists, so no command can leave the state half-mutated.
    pub fn apply_tc(mut self, tc: &Tc) -> Self {
        match *tc {
            Tc::SetHeight(height_m) => self.target_height_m = height_m,
            Tc::ModHeight(delta_m) => self.target_height_m += delta_m,
            Tc::ToggleHover => self.hover_enabled = !self.hover_enabled,
            Tc::ManualMode => self.manual_adjust = !self.manual_adjust,
            Tc::ResetHeight => self.target_height_m = DEFAULT_TARGET_HEIGHT_M,
            // Routed to the continuous input channel by the TC processor,
            // never a mode transition
            Tc::Adjust(_) => (),
        }

        self
    }

    /// Encode the state into the flat storage blob.
    ///
    /// Format: `hover_enabled;manual_adjust;target_height`, written once at
    /// shutdown.
    pub fn encode(&self) -> String {
        format!(
            "{1}{0}{2}{0}{3}",
            STORAGE_DELIMITER, self.hover_enabled, self.manual_adjust, self.target_height_m
        )
    }

    /// Decode a storage blob, read once at startup.
    ///
    /// Each field is parsed independently and left at its default on parse
    /// failure. A blob without exactly three fields leaves the whole state at
    /// defaults. Booleans are matched case-insensitively since historical
    /// blobs carry `True`/`False`.
    pub fn decode(blob: &str) -> Self {
        let mut state = Self::default();

        let fields: Vec<&str> = blob.split(STORAGE_DELIMITER).collect();
        if fields.len() != 3 {
            return state;
        }

        if let Ok(b) = fields[0].trim().to_ascii_lowercase().parse::<bool>() {
            state.hover_enabled = b;
        }
        if let Ok(b) = fields[1].trim().to_ascii_lowercase().parse::<bool>() {
            state.manual_adjust = b;
        }
        if let Ok(v) = fields[2].trim().parse::<f64>() {
            state.target_height_m = v;
        }

        state
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_apply_tc() {
        let state = ModeState::default();

        let state = state.apply_tc(&Tc::ToggleHover);
        assert!(state.hover_enabled);

        let state = state.apply_tc(&Tc::SetHeight(25.0));
        assert_eq!(state.target_height_m, 25.0);

        let state = state.apply_tc(&Tc::ModHeight(-5.0));
        assert_eq!(state.target_height_m, 20.0);

        let state = state.apply_tc(&Tc::ManualMode);
        assert!(state.manual_adjust);

        let state = state.apply_tc(&Tc::ResetHeight);
        assert_eq!(state.target_height_m, DEFAULT_TARGET_HEIGHT_M);

        let state = state.apply_tc(&Tc::ToggleHover);
        assert!(!state.hover_enabled);
    }

    #[test]
    fn test_decode_valid_blob() {
        // Historical blobs capitalise the booleans
        let state = ModeState::decode("True;False;25.5");
        assert!(state.hover_enabled);
        assert!(!state.manual_adjust);
        assert_eq!(state.target_height_m, 25.5);
    }

    #[test]
    fn test_decode_malformed_blob() {
        // Wrong field count leaves everything at defaults
        assert_eq!(ModeState::decode("garbage"), ModeState::default());
        assert_eq!(ModeState::decode(""), ModeState::default());
        assert_eq!(ModeState::decode("true;false;10;extra"), ModeState::default());
    }

    #[test]
    fn test_decode_per_field_fallback() {
        // Fields are parsed independently: bad ones default, good ones stick
        let state = ModeState::decode("notabool;true;xyz");
        assert!(!state.hover_enabled);
        assert!(state.manual_adjust);
        assert_eq!(state.target_height_m, DEFAULT_TARGET_HEIGHT_M);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let state = ModeState {
            hover_enabled: true,
            manual_adjust: false,
            target_height_m: 42.25,
        };
        assert_eq!(ModeState::decode(&state.encode()), state);
    }
}
