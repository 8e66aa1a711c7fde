//! Integration tests for the session engine's costs, rejections and verdicts.

use casefile::game::{generate_tutorial_case, GamePhase};
use casefile::{
    ActionDetail, CaseError, ClueId, Game, LocationId, Presentation, SuspectId, Verdict, TIMELINE_LIMIT,
};

// ── Helpers ────────────────────────────────────────────────────────────

fn tutorial() -> Game {
    Game::from_case(generate_tutorial_case(), 21)
}

fn snapshot(game: &Game) -> (i32, u32, usize, LocationId) {
    (
        game.credibility(),
        game.turns(),
        game.collected_clues().len(),
        game.current_location().id,
    )
}

/// Drive the tutorial into a loss by wrong accusations
fn discredited() -> Game {
    let mut game = tutorial();
    game.perform("accuse Jordan").unwrap();
    game.perform("accuse Riley").unwrap();
    assert!(game.is_terminal());
    game
}

// ── Movement ───────────────────────────────────────────────────────────

#[test]
fn move_by_name_or_number() {
    let mut game = tutorial();
    let outcome = game.perform("move OFFICE").unwrap();
    assert_eq!(
        outcome.detail,
        ActionDetail::Moved { from: LocationId(0), to: LocationId(2) }
    );
    game.perform("go 4").unwrap();
    assert_eq!(game.current_location().name, "Park");
    assert_eq!((game.credibility(), game.turns()), (8, 2));

    let summaries = game.location_summaries();
    assert!(summaries[3].is_current);
    assert_eq!(summaries.iter().filter(|l| l.is_current).count(), 1);
    assert_eq!(summaries[0].clue_count, 2);
}

#[test]
fn unknown_location_is_rejected() {
    let mut game = tutorial();
    let before = snapshot(&game);
    assert_eq!(
        game.perform("move 9"),
        Err(CaseError::UnknownLocation("9".to_string()))
    );
    assert!(matches!(game.move_to(LocationId(12)), Err(CaseError::UnknownLocation(_))));
    assert_eq!(snapshot(&game), before);
}

// ── Search ─────────────────────────────────────────────────────────────

#[test]
fn search_rejections_leave_state_alone() {
    let mut game = tutorial();
    let before = snapshot(&game);
    assert_eq!(game.search(ClueId(2)), Err(CaseError::ClueNotHere(ClueId(2))));
    assert_eq!(game.search(ClueId(99)), Err(CaseError::ClueNotHere(ClueId(99))));
    assert!(matches!(game.perform("search x1"), Err(CaseError::MalformedClueId(_))));
    assert!(matches!(game.perform("search"), Err(CaseError::MissingArgument(_))));
    assert_eq!(snapshot(&game), before);

    game.search(ClueId(4)).unwrap();
    let before = snapshot(&game);
    assert_eq!(game.search(ClueId(4)), Err(CaseError::AlreadyCollected(ClueId(4))));
    assert_eq!(snapshot(&game), before);
    assert_eq!(game.current_location().clues.len(), 1);
}

// ── Interrogation ──────────────────────────────────────────────────────

#[test]
fn repeat_interrogation_is_free() {
    let mut game = tutorial();
    game.perform("interrogate Morgan").unwrap();
    assert_eq!((game.credibility(), game.turns()), (9, 1));

    let outcome = game.perform("question morgan hale").unwrap();
    assert_eq!(outcome.detail, ActionDetail::AlreadyInterrogated { suspect: SuspectId(3) });
    assert_eq!((outcome.credibility, outcome.turns), (9, 1));
}

#[test]
fn leads_point_at_matching_clues() {
    // With enough seeds at least one interrogation of Avery turns up a lead
    let mut found = 0;
    for seed in 0..60 {
        let mut game = Game::from_case(generate_tutorial_case(), seed);
        let outcome = game.perform("interrogate avery").unwrap();
        match outcome.detail {
            ActionDetail::Interrogated { lead: Some(location), .. } => {
                found += 1;
                assert!(location == LocationId(0) || location == LocationId(2));
                assert_eq!(game.leads().len(), 1);
                assert_eq!(game.notebook().leads.len(), 1);
            }
            ActionDetail::Interrogated { lead: None, .. } => {
                assert!(game.leads().is_empty());
                assert!(outcome.messages.iter().any(|m| m.text.contains("maintains their alibi: Office")));
            }
            other => panic!("unexpected detail {other:?}"),
        }
    }
    assert!(found > 0);
}

#[test]
fn unknown_suspect_is_rejected() {
    let mut game = tutorial();
    assert_eq!(
        game.perform("interrogate Sherlock"),
        Err(CaseError::UnknownSuspect("Sherlock".to_string()))
    );
    assert!(matches!(game.present_evidence(SuspectId(40)), Err(CaseError::UnknownSuspect(_))));
    assert_eq!((game.credibility(), game.turns()), (10, 0));
}

// ── Presentation ───────────────────────────────────────────────────────

#[test]
fn strong_presentation_is_not_repeatable() {
    let mut game = tutorial();
    game.perform("search 1").unwrap();
    game.perform("search 4").unwrap();
    game.perform("present avery").unwrap();
    assert_eq!(game.presentation(SuspectId(0)), Some(Presentation::Strong));
    let before = snapshot(&game);

    let outcome = game.perform("present avery").unwrap();
    assert_eq!(outcome.detail, ActionDetail::AlreadyStrong { suspect: SuspectId(0) });
    assert_eq!(snapshot(&game), before);
}

#[test]
fn spent_clues_count_against_other_suspects() {
    let mut game = tutorial();
    game.perform("search 1").unwrap();
    game.perform("search 4").unwrap();
    game.perform("present avery").unwrap();

    // Spending is per suspect; Jordan simply shares no tags
    let outcome = game.perform("present jordan").unwrap();
    assert!(matches!(
        outcome.detail,
        ActionDetail::Presented { outcome: Presentation::None, .. }
    ));
    assert!(game.case().suspect(SuspectId(1)).unwrap().spent_clues.is_empty());
}

#[test]
fn credibility_never_exceeds_the_start() {
    let mut game = tutorial();
    game.perform("search 1").unwrap();
    game.perform("search 4").unwrap();
    let outcome = game.perform("present avery").unwrap();
    assert!(outcome.credibility <= 10);
    let outcome = game.perform("accuse avery").unwrap();
    assert_eq!(outcome.credibility, 10);
}

// ── Accusation and verdicts ────────────────────────────────────────────

#[test]
fn wrong_accusation_costs_six() {
    let mut game = tutorial();
    let outcome = game.perform("accuse Jordan").unwrap();
    assert!(matches!(
        outcome.detail,
        ActionDetail::Accused { correct: false, proven: false, .. }
    ));
    assert_eq!((outcome.credibility, outcome.turns), (4, 1));
    assert!(!outcome.terminal);
}

#[test]
fn losing_reports_the_true_culprit() {
    let game = discredited();
    assert_eq!(game.phase(), GamePhase::Discredited);
    assert_eq!(game.credibility(), 0);
    assert_eq!(
        game.verdict(),
        Some(Verdict::Discredited { culprit: "Avery Collins".to_string() })
    );
}

#[test]
fn closed_case_rejects_everything_with_the_same_verdict() {
    let mut game = discredited();
    let verdict = game.verdict().unwrap();
    let before = (game.credibility(), game.turns(), game.timeline().len());

    for input in ["examine", "move office", "search 1", "interrogate avery", "present avery", "accuse avery"] {
        assert_eq!(game.perform(input), Err(CaseError::CaseClosed(verdict.clone())), "{input}");
    }
    assert_eq!((game.credibility(), game.turns(), game.timeline().len()), before);
}

#[test]
fn accusation_cut_short_by_its_own_cost() {
    let mut game = tutorial();
    game.perform("accuse Jordan").unwrap(); // 4
    game.perform("present Morgan").unwrap(); // 4 - 1 - 2 = 1
    assert_eq!(game.credibility(), 1);

    let outcome = game.perform("accuse Avery").unwrap();
    assert_eq!(outcome.detail, ActionDetail::Halted);
    assert_eq!(
        outcome.verdict,
        Some(Verdict::Discredited { culprit: "Avery Collins".to_string() })
    );
}

#[test]
fn interrogation_cut_short_by_its_own_cost() {
    let mut game = tutorial();
    game.perform("accuse Jordan").unwrap(); // 4
    game.perform("present Morgan").unwrap(); // 4 - 1 - 2 = 1
    assert_eq!(game.credibility(), 1);

    let outcome = game.perform("interrogate Avery").unwrap();
    assert_eq!(outcome.detail, ActionDetail::Halted);
    assert!(game.leads().is_empty());
    assert!(!outcome.messages.iter().any(|m| m.text.contains("maintains their alibi")));
    assert_eq!(
        outcome.verdict,
        Some(Verdict::Discredited { culprit: "Avery Collins".to_string() })
    );
}

#[test]
fn presentation_cut_short_by_its_own_cost() {
    let mut game = tutorial();
    game.perform("search 1").unwrap(); // 9
    game.perform("search 4").unwrap(); // 8
    game.perform("accuse Jordan").unwrap(); // 8 - 1 - 5 = 2
    game.perform("interrogate Morgan").unwrap(); // 1
    assert_eq!(game.credibility(), 1);

    // Two linking clues in hand would have scored strong
    let outcome = game.perform("present Avery").unwrap();
    assert_eq!(outcome.detail, ActionDetail::Halted);
    assert_eq!(game.presentation(SuspectId(0)), None);
    assert!(game.case().suspect(SuspectId(0)).unwrap().spent_clues.is_empty());
    assert_eq!(game.credibility(), 0);
    assert_eq!(game.phase(), GamePhase::Discredited);
}

#[test]
fn free_actions_do_not_grow_the_timeline_without_bound() {
    let mut game = tutorial();
    for _ in 0..2_000 {
        game.examine().unwrap();
    }
    assert_eq!(game.turns(), 0);
    assert_eq!(game.timeline().len(), TIMELINE_LIMIT);
    assert!(game.timeline().recent(1)[0].text.starts_with("  id 4:"));
}

#[test]
fn random_cases_can_be_solved_by_following_the_trail() {
    for seed in 0..40 {
        let mut game = Game::start_new_case(seed).unwrap();
        let tag = game.case().linking_tag().to_string();
        let trail: Vec<(LocationId, ClueId)> = game
            .case()
            .uncollected_clues()
            .filter(|(_, c)| c.tags.contains(&tag))
            .map(|(l, c)| (l, c.id))
            .collect();

        for (location, clue) in trail {
            game.move_to(location).unwrap();
            game.search(clue).unwrap();
        }
        let culprit = game.case().culprit();
        let outcome = game.accuse(culprit).unwrap();
        assert!(
            matches!(outcome.verdict, Some(Verdict::Solved { .. })),
            "seed {seed}: {:?}",
            outcome.verdict
        );
        assert!(game.turns() <= 9);
    }
}

#[test]
fn suspect_summaries_track_progress() {
    let mut game = tutorial();
    game.perform("interrogate riley").unwrap();
    game.perform("present riley").unwrap();
    let riley = &game.suspect_summaries()[2];
    assert_eq!(riley.name, "Riley Park");
    assert_eq!(riley.alibi, "Local Bar");
    assert!(riley.interrogated);
    assert_eq!(riley.presentation, Some(Presentation::None));

    let lines = game.notebook().lines();
    assert_eq!(lines[0], "Collected clues:");
    assert_eq!(lines[1], "- none");
    assert!(lines.iter().any(|l| l.contains("Riley Park | alibi: Local Bar | interrogated | presented: none")));
}
