/// Property-based tests for blackjack hand scoring using proptest
///
/// These tests verify the soft-ace scoring rules across randomly
/// generated hands rather than hand-picked examples.
use casino_engine::blackjack::{Card, Deck, Hand, Rank, Suit, BLACKJACK_SCORE};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn card_strategy() -> impl Strategy<Value = Card> {
    (0usize..13, 0usize..4).prop_map(|(rank_idx, suit_idx)| Card {
        rank: Rank::ALL[rank_idx],
        suit: Suit::ALL[suit_idx],
    })
}

fn hand_strategy(max_cards: usize) -> impl Strategy<Value = Hand> {
    prop::collection::vec(card_strategy(), 1..=max_cards).prop_map(|cards| {
        let mut hand = Hand::new();
        for card in cards {
            hand.push(card);
        }
        hand
    })
}

/// Total with every ace counted as 1.
fn hard_total(hand: &Hand) -> u32 {
    hand.cards()
        .iter()
        .map(|card| match card.rank {
            Rank::Ace => 1,
            other => other.value(),
        })
        .sum()
}

/// Total with every ace counted as 11.
fn soft_total(hand: &Hand) -> u32 {
    hand.cards().iter().map(|card| card.rank.value()).sum()
}

proptest! {
    #[test]
    fn test_score_bounded_by_hard_and_soft_totals(hand in hand_strategy(10)) {
        let score = hand.score();
        prop_assert!(score >= hard_total(&hand));
        prop_assert!(score <= soft_total(&hand));
    }

    #[test]
    fn test_reductions_never_exceed_ace_count(hand in hand_strategy(10)) {
        let aces = hand
            .cards()
            .iter()
            .filter(|card| card.rank == Rank::Ace)
            .count() as u32;
        let reduced = soft_total(&hand) - hand.score();
        prop_assert_eq!(reduced % 10, 0, "aces reduce in steps of 10");
        prop_assert!(reduced / 10 <= aces);
    }

    #[test]
    fn test_no_bust_while_hard_total_fits(hand in hand_strategy(10)) {
        // As long as counting every ace low stays within 21, the scorer
        // must find a non-bust interpretation.
        if hard_total(&hand) <= BLACKJACK_SCORE {
            prop_assert!(!hand.is_bust(), "score {} busts needlessly", hand.score());
        } else {
            prop_assert!(hand.is_bust());
        }
    }

    #[test]
    fn test_score_is_maximal_non_bust(hand in hand_strategy(10)) {
        // Softening stops as soon as the total fits: softening one ace
        // fewer would bust (or there was nothing to soften).
        let score = hand.score();
        if score <= BLACKJACK_SCORE && score < soft_total(&hand) {
            prop_assert!(score + 10 > BLACKJACK_SCORE);
        }
    }

    #[test]
    fn test_aceless_hand_scores_literal_sum(
        cards in prop::collection::vec((1usize..13, 0usize..4), 1..8)
    ) {
        let mut hand = Hand::new();
        for (rank_idx, suit_idx) in cards {
            hand.push(Card {
                rank: Rank::ALL[rank_idx],
                suit: Suit::ALL[suit_idx],
            });
        }
        prop_assert_eq!(hand.score(), soft_total(&hand));
    }

    #[test]
    fn test_shuffled_deck_deals_52_unique_cards(seed in 0u64..10_000) {
        use rand::{rngs::StdRng, SeedableRng};
        let mut deck = Deck::default();
        deck.shuffle(&mut StdRng::seed_from_u64(seed));
        let mut seen = BTreeSet::new();
        for _ in 0..52 {
            seen.insert(deck.deal());
        }
        prop_assert_eq!(seen.len(), 52);
    }
}
