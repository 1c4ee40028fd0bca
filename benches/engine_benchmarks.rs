use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::sync::Arc;

use casino_engine::blackjack::{BlackjackRound, Card, Hand, Rank, RoundProgress, Suit};
use casino_engine::config::{BlackjackConfig, MinesConfig, PlinkoConfig};
use casino_engine::mines::{self, MinesRound};
use casino_engine::plinko::PlinkoBoard;
use casino_engine::slots::{evaluate, ReelResult, Symbol};
use casino_engine::Ledger;
use rand::{rngs::StdRng, SeedableRng};

/// Helper to build a hand from ranks (suits are irrelevant to scoring)
fn hand_of(ranks: &[Rank]) -> Hand {
    let mut hand = Hand::new();
    for &rank in ranks {
        hand.push(Card {
            rank,
            suit: Suit::Spades,
        });
    }
    hand
}

/// Benchmark scoring a plain two-card hand
fn bench_hand_score_2_cards(c: &mut Criterion) {
    let hand = hand_of(&[Rank::King, Rank::Nine]);
    c.bench_function("hand_score_2_cards", |b| {
        b.iter(|| hand.score());
    });
}

/// Benchmark scoring a hand full of aces (worst case for softening)
fn bench_hand_score_ace_heavy(c: &mut Criterion) {
    let hand = hand_of(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ace, Rank::Nine]);
    c.bench_function("hand_score_ace_heavy", |b| {
        b.iter(|| hand.score());
    });
}

/// Benchmark the mines multiplier curve at increasing reveal depth
fn bench_mines_multiplier(c: &mut Criterion) {
    let mut group = c.benchmark_group("mines_multiplier");
    for revealed in [1, 5, 10, 20].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_reveals", revealed)),
            revealed,
            |b, &k| {
                b.iter(|| mines::multiplier(25, 3, k, 0.01));
            },
        );
    }
    group.finish();
}

/// Benchmark slot reel classification across every tier shape
fn bench_slots_evaluate(c: &mut Criterion) {
    let draws = [
        ReelResult([Symbol::Crown, Symbol::Crown, Symbol::Crown]),
        ReelResult([Symbol::Cherry, Symbol::Cherry, Symbol::Cherry]),
        ReelResult([Symbol::Star, Symbol::Apple, Symbol::Star]),
        ReelResult([Symbol::Apple, Symbol::Banana, Symbol::Grape]),
    ];
    c.bench_function("slots_evaluate_4_tiers", |b| {
        b.iter(|| {
            draws
                .iter()
                .map(evaluate)
                .collect::<Vec<_>>()
        });
    });
}

/// Benchmark a full blackjack round played to settlement
fn bench_blackjack_round(c: &mut Criterion) {
    c.bench_function("blackjack_full_round", |b| {
        b.iter_batched(
            || {
                let ledger = Arc::new(Ledger::new(1_000_000, 100));
                BlackjackRound::with_rng(
                    BlackjackConfig::default(),
                    ledger,
                    StdRng::seed_from_u64(42),
                )
            },
            |mut round| {
                match round.start(100).unwrap() {
                    RoundProgress::InPlay(_) => {
                        round.stand().unwrap();
                    }
                    RoundProgress::Settled(_) => {}
                }
                round
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark laying out a fresh mines board
fn bench_mines_start(c: &mut Criterion) {
    c.bench_function("mines_board_start", |b| {
        b.iter_batched(
            || {
                let ledger = Arc::new(Ledger::new(1_000_000, 100));
                MinesRound::with_rng(
                    MinesConfig::default(),
                    ledger,
                    StdRng::seed_from_u64(7),
                )
            },
            |mut round| {
                round.start(100, 5).unwrap();
                round
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark a single plinko drop (one weighted draw plus settlement)
fn bench_plinko_drop(c: &mut Criterion) {
    let ledger = Arc::new(Ledger::new(u64::MAX / 2, 100));
    let mut board = PlinkoBoard::with_rng(
        PlinkoConfig::default(),
        ledger,
        StdRng::seed_from_u64(11),
    )
    .unwrap();
    c.bench_function("plinko_drop", |b| {
        b.iter(|| board.drop(100).unwrap());
    });
}

criterion_group!(
    resolution,
    bench_hand_score_2_cards,
    bench_hand_score_ace_heavy,
    bench_mines_multiplier,
    bench_slots_evaluate,
);

criterion_group!(
    rounds,
    bench_blackjack_round,
    bench_mines_start,
    bench_plinko_drop,
);

criterion_main!(resolution, rounds);
