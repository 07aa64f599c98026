//! End-to-end minigame sessions driven through the public controller API

use craft_minigames::settings::{CylinderSettings, GridSettings};
use craft_minigames::sim::{
    CylinderAlignmentPuzzle, GridRotationPuzzle, PuzzleAction, PuzzleEngine, SessionState,
};
use craft_minigames::{
    ChallengeKind, CompletionReason, MinigameController, MinigameSettings, QualityTier,
    ResultBook, SessionEvent,
};

fn seeded(seed: u64) -> MinigameController {
    let settings = MinigameSettings {
        seed: Some(seed),
        ..Default::default()
    };
    MinigameController::new(settings, Vec::new()).unwrap()
}

#[test]
fn grid_single_turns_from_ninety_degrees_run_out_of_moves() {
    let mut controller = seeded(1);
    let grid = GridRotationPuzzle::from_cells(&GridSettings::default(), vec![1; 16]).unwrap();
    controller
        .start_with_puzzle(PuzzleEngine::Grid(grid), "recipe-1", 30.0)
        .unwrap();

    // One turn per tile moves every tile from 90° to 180°, still unsolved
    for y in 0..4 {
        for x in 0..4 {
            controller.tick(0.1);
            controller.submit_action(PuzzleAction::Rotate { x, y });
        }
    }
    assert!(controller.is_active());
    let grid = controller.puzzle().and_then(PuzzleEngine::as_grid).unwrap();
    assert_eq!(grid.move_count(), 16);
    assert_eq!(grid.aligned_count(), 0);

    for x in 0..4 {
        controller.submit_action(PuzzleAction::Rotate { x, y: 0 });
    }
    let events = controller.sink();
    assert_eq!(events.len(), 1);
    let outcome = events[0].outcome().unwrap();
    assert_eq!(outcome.reason, CompletionReason::Exhausted);
    assert!((outcome.performance - 0.3).abs() < 1e-6);
    assert_eq!(outcome.tier, QualityTier::Fine);
}

#[test]
fn grid_solved_in_sixteen_moves_grades_normal() {
    let mut controller = seeded(1);
    // Every tile sits at 270°: a single quarter turn each brings it home
    let grid = GridRotationPuzzle::from_cells(&GridSettings::default(), vec![3; 16]).unwrap();
    controller
        .start_with_puzzle(PuzzleEngine::Grid(grid), "recipe-1", 30.0)
        .unwrap();

    for y in 0..4 {
        for x in 0..4 {
            controller.tick(0.1);
            controller.submit_action(PuzzleAction::Rotate { x, y });
        }
    }

    assert_eq!(controller.state(), SessionState::Completed);
    let events = controller.sink();
    assert_eq!(events.len(), 1);
    let outcome = events[0].outcome().unwrap();
    assert_eq!(outcome.session_id, "recipe-1");
    assert_eq!(outcome.kind, ChallengeKind::GridRotation);
    assert_eq!(outcome.reason, CompletionReason::Solved);
    assert!((outcome.performance - 0.2).abs() < 1e-5);
    assert_eq!(outcome.tier, QualityTier::Normal);
}

#[test]
fn cylinder_strike_near_target_is_accepted() {
    let mut controller = seeded(2);
    let mut cylinder = CylinderAlignmentPuzzle::new(&CylinderSettings::default());
    cylinder.target_angle = 180.0;
    cylinder.rotation = 185.0;
    controller
        .start_with_puzzle(PuzzleEngine::Cylinder(cylinder), "recipe-2", 30.0)
        .unwrap();

    controller.submit_action(PuzzleAction::Strike);

    let cylinder = controller.puzzle().and_then(PuzzleEngine::as_cylinder).unwrap();
    assert_eq!(cylinder.alignments_made(), 1);
    assert_eq!(cylinder.rotation_speed(), 130.0);
    assert!(controller.is_active());
}

#[test]
fn second_start_supersedes_first() {
    let mut controller = seeded(3);
    controller.start(ChallengeKind::GridRotation, "first", 10.0).unwrap();
    controller.start(ChallengeKind::CylinderAlignment, "second", 5.0).unwrap();

    let session = controller.session().unwrap();
    assert_eq!(session.id, "second");
    assert_eq!(session.kind, ChallengeKind::CylinderAlignment);
    assert!(controller.sink().is_empty());

    // Run the clock out: only the surviving session reports
    for _ in 0..100 {
        controller.tick(0.1);
    }
    let events = controller.sink();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].session_id(), "second");
}

#[test]
fn cancel_while_idle_does_nothing() {
    let mut controller = seeded(4);
    assert!(!controller.cancel());
    assert_eq!(controller.state(), SessionState::Idle);
    assert!(controller.sink().is_empty());
}

#[test]
fn timer_expiry_finalizes_exactly_once() {
    let mut controller = seeded(5);
    controller.start(ChallengeKind::CylinderAlignment, "slow", 1.0).unwrap();

    let mut previous = 1.0;
    for _ in 0..50 {
        controller.tick(1.0 / 30.0);
        let remaining = controller.session().unwrap().time_remaining;
        assert!(remaining <= previous && remaining >= 0.0);
        previous = remaining;
    }

    assert_eq!(controller.session().unwrap().time_remaining, 0.0);
    let events = controller.sink();
    assert_eq!(events.len(), 1);
    let outcome = events[0].outcome().unwrap();
    assert_eq!(outcome.reason, CompletionReason::TimedOut);
    assert_eq!(outcome.performance, 0.0);
    assert_eq!(outcome.tier, QualityTier::Normal);
}

#[test]
fn cancel_then_restart_reports_each_session_once() {
    let mut controller = seeded(6);
    controller.start(ChallengeKind::GridRotation, "a", 10.0).unwrap();
    assert!(controller.cancel());
    controller.start(ChallengeKind::GridRotation, "b", 0.5).unwrap();
    controller.tick(1.0);

    let events = controller.sink();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], SessionEvent::Canceled { session_id: "a".into() });
    assert_eq!(events[1].session_id(), "b");
}

#[test]
fn result_book_as_sink() {
    let settings = MinigameSettings {
        seed: Some(7),
        ..Default::default()
    };
    let mut controller = MinigameController::new(settings, ResultBook::new()).unwrap();

    let mut cylinder = CylinderAlignmentPuzzle::new(&CylinderSettings {
        alignments_needed: 1,
        ..Default::default()
    });
    // Marker starts at 0°, so a strike right away lands dead centre
    cylinder.target_angle = 0.0;
    controller
        .start_with_puzzle(PuzzleEngine::Cylinder(cylinder), "perfect", 10.0)
        .unwrap();
    controller.submit_action(PuzzleAction::Strike);

    controller.start(ChallengeKind::GridRotation, "abandoned", 10.0).unwrap();
    controller.cancel();

    let book = controller.into_sink();
    let best = book.best(ChallengeKind::CylinderAlignment).unwrap();
    assert_eq!(best.session_id, "perfect");
    assert_eq!(best.reason, CompletionReason::Solved);
    assert_eq!(best.tier, QualityTier::Legendary);
    assert_eq!(book.canceled, 1);
    assert!(book.best(ChallengeKind::GridRotation).is_none());
}

#[test]
fn grid_dealt_already_aligned_completes_without_input() {
    let mut controller = seeded(8);
    let grid = GridRotationPuzzle::from_cells(&GridSettings::default(), vec![0; 16]).unwrap();
    controller
        .start_with_puzzle(PuzzleEngine::Grid(grid), "gift", 30.0)
        .unwrap();
    controller.tick(0.1);

    assert!(!controller.is_active());
    let events = controller.sink();
    assert_eq!(events.len(), 1);
    let outcome = events[0].outcome().unwrap();
    assert_eq!(outcome.reason, CompletionReason::Solved);
    assert_eq!(outcome.performance, 1.0);
    assert_eq!(outcome.tier, QualityTier::Legendary);
}

#[test]
fn result_book_remembers_scoreless_timeout() {
    let settings = MinigameSettings {
        seed: Some(9),
        ..Default::default()
    };
    let mut controller = MinigameController::new(settings, ResultBook::new()).unwrap();
    controller.start(ChallengeKind::CylinderAlignment, "idle", 0.5).unwrap();
    controller.tick(1.0);

    let book = controller.into_sink();
    assert!(book.best(ChallengeKind::CylinderAlignment).is_none());
    let last = book.last.unwrap();
    assert_eq!(last.session_id, "idle");
    assert_eq!(last.reason, CompletionReason::TimedOut);
    assert_eq!(last.performance, 0.0);
}
