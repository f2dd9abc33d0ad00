use proptest::prelude::*;

use signal_phases::core::signal::ALPHABET;
use signal_phases::error::InvalidPhaseShape;
use signal_phases::space::PhaseSpace;
use signal_phases::{classify, Phase, PHASE_COUNT};

#[test]
fn every_phase_decodes_to_itself() {
    for (i, phase) in PhaseSpace::new().enumerate() {
        let text = phase.encode();
        assert_eq!(text.len(), 12);
        let back = Phase::decode(&text).unwrap();
        assert_eq!(back, phase);
        assert_eq!(back.index(), i);
        assert_eq!(Phase::from_index(i).unwrap(), phase);
    }
}

#[test]
fn multibyte_symbols_are_counted_as_characters() {
    assert_eq!(
        Phase::decode("rrrrrrrrrrr→"),
        Err(InvalidPhaseShape::UnknownSymbol {
            position: 11,
            symbol: '→'
        })
    );
}

fn any_phase() -> impl Strategy<Value = Phase> {
    prop::array::uniform12(prop::sample::select(ALPHABET.to_vec())).prop_map(Phase::new)
}

proptest! {
    #[test]
    fn decode_classify_encode_is_lossless(phase in any_phase()) {
        let text = phase.to_string();
        let decoded: Phase = text.parse().unwrap();
        let verdict = classify(&decoded);
        prop_assert_eq!(decoded.encode(), text);
        prop_assert_eq!(verdict, classify(&phase));
    }

    #[test]
    fn index_round_trips(index in 0..PHASE_COUNT) {
        let phase = Phase::from_index(index).unwrap();
        prop_assert_eq!(phase.index(), index);
    }

    #[test]
    fn decode_never_panics(text in "[rRgGx]{0,14}") {
        match Phase::decode(&text) {
            Ok(p) => {
                prop_assert_eq!(text.chars().count(), 12);
                prop_assert_eq!(p.encode(), text.replace('R', "r"));
            }
            Err(InvalidPhaseShape::WrongLength { found, .. }) => {
                prop_assert_eq!(found, text.chars().count());
            }
            Err(InvalidPhaseShape::UnknownSymbol { symbol, .. }) => {
                prop_assert_eq!(symbol, 'x');
            }
            Err(e) => prop_assert!(false, "unexpected error {e}"),
        }
    }
}
