//! Aggregation engine turning the raw score ledger into published standings.
//!
//! Pure with respect to its inputs: given the roster, the ledger, the contest
//! universe, and the jury roster it always produces the same standings, which
//! the caller then swaps in wholesale for the previous collection.

use std::time::SystemTime;

use crate::config::{JuryMember, UNKNOWN_JURY_LABEL};
use crate::dao::models::{JuryScoreEntity, ScoreEntity, StandingEntity, TeamEntity};

/// Rebuild the standings for every team across the whole contest universe.
///
/// A `(team, contest)` pair with no ledger rows emits no standing. The average
/// divides by however many judges have scored so far, so a team scored by one
/// of six judges shows that judge's raw score.
pub fn recompute(
    teams: &[TeamEntity],
    scores: &[ScoreEntity],
    contests: &[String],
    jury: &[JuryMember],
) -> Vec<StandingEntity> {
    let mut standings = Vec::new();

    for team in teams {
        for contest_id in contests {
            let jury_scores: Vec<JuryScoreEntity> = scores
                .iter()
                .filter(|score| score.team_id == team.id && score.contest_id == *contest_id)
                .map(|score| JuryScoreEntity {
                    jury_id: score.jury_id.clone(),
                    jury_name: resolve_jury_name(jury, &score.jury_id),
                    score: score.score,
                })
                .collect();

            if jury_scores.is_empty() {
                continue;
            }

            let sum: f64 = jury_scores.iter().map(|entry| entry.score).sum();
            let average = sum / jury_scores.len() as f64;

            standings.push(StandingEntity {
                team_id: team.id.clone(),
                contest_id: contest_id.clone(),
                average_score: round_one_decimal(average),
                jury_scores,
                computed_at: SystemTime::now(),
            });
        }
    }

    standings
}

/// Round half away from zero to one decimal place.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn resolve_jury_name(jury: &[JuryMember], jury_id: &str) -> String {
    jury.iter()
        .find(|member| member.id == jury_id)
        .map(|member| member.name.clone())
        .unwrap_or_else(|| UNKNOWN_JURY_LABEL.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str) -> TeamEntity {
        TeamEntity {
            id: id.to_owned(),
            name: format!("Team {id}"),
            members: vec![],
            total_score: 0.0,
        }
    }

    fn score(team_id: &str, contest_id: &str, jury_id: &str, value: f64) -> ScoreEntity {
        ScoreEntity {
            team_id: team_id.to_owned(),
            contest_id: contest_id.to_owned(),
            jury_id: jury_id.to_owned(),
            score: value,
            details: None,
            submitted_at: SystemTime::now(),
        }
    }

    fn jury(ids: &[&str]) -> Vec<JuryMember> {
        ids.iter()
            .map(|id| JuryMember {
                id: (*id).to_owned(),
                name: format!("Jury {id}"),
            })
            .collect()
    }

    fn contests(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| (*id).to_owned()).collect()
    }

    #[test]
    fn averages_over_contributing_judges() {
        let standings = recompute(
            &[team("t1")],
            &[
                score("t1", "visit-card", "a", 6.0),
                score("t1", "visit-card", "b", 5.0),
                score("t1", "visit-card", "c", 7.0),
            ],
            &contests(&["visit-card"]),
            &jury(&["a", "b", "c"]),
        );

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].average_score, 6.0);
        assert_eq!(standings[0].jury_scores.len(), 3);
    }

    #[test]
    fn partial_scoring_uses_actual_judge_count() {
        let standings = recompute(
            &[team("t2")],
            &[score("t2", "clinical-case", "a", 4.0)],
            &contests(&["clinical-case"]),
            &jury(&["a", "b", "c", "d", "e", "f"]),
        );

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].average_score, 4.0);
        assert_eq!(standings[0].jury_scores.len(), 1);
    }

    #[test]
    fn rounds_half_away_from_zero_to_one_decimal() {
        let standings = recompute(
            &[team("t1")],
            &[
                score("t1", "visit-card", "a", 5.0),
                score("t1", "visit-card", "b", 5.0),
                score("t1", "visit-card", "c", 6.0),
            ],
            &contests(&["visit-card"]),
            &jury(&["a", "b", "c"]),
        );

        // 16 / 3 = 5.333... -> 5.3
        assert_eq!(standings[0].average_score, 5.3);

        assert_eq!(round_one_decimal(5.35), 5.4);
        assert_eq!(round_one_decimal(-5.35), -5.4);
        assert_eq!(round_one_decimal(2.25), 2.3);
    }

    #[test]
    fn unscored_pairs_emit_no_standing() {
        let standings = recompute(
            &[team("t1"), team("t2")],
            &[score("t1", "visit-card", "a", 3.0)],
            &contests(&["visit-card", "mind-battle"]),
            &jury(&["a"]),
        );

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].team_id, "t1");
        assert_eq!(standings[0].contest_id, "visit-card");
    }

    #[test]
    fn scores_outside_the_contest_universe_are_ignored() {
        let standings = recompute(
            &[team("t1")],
            &[score("t1", "karaoke", "a", 9.0)],
            &contests(&["visit-card"]),
            &jury(&["a"]),
        );

        assert!(standings.is_empty());
    }

    #[test]
    fn unknown_jury_ids_resolve_to_the_sentinel_label() {
        let standings = recompute(
            &[team("t1")],
            &[score("t1", "visit-card", "ghost", 2.0)],
            &contests(&["visit-card"]),
            &jury(&["a"]),
        );

        assert_eq!(standings[0].jury_scores[0].jury_name, UNKNOWN_JURY_LABEL);
    }
}
