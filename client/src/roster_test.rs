use super::*;

use protocol::PlayerProfile;

fn two_player_info() -> PlayerInfo {
    PlayerInfo {
        identity: 1,
        players: vec![
            PlayerProfile { name: "ada".into(), color: "#e33".into() },
            PlayerProfile { name: "kay".into(), color: "#33e".into() },
        ],
        win_loss_draw_record: vec![
            WinLossDraw { wins: 3, losses: 1, draws: 0 },
            WinLossDraw { wins: 1, losses: 3, draws: 0 },
        ],
    }
}

#[test]
fn player_info_sets_identity_and_profiles() {
    let mut roster = Roster::new();
    roster.apply_player_info(&two_player_info());

    assert_eq!(roster.local_index(), Some(1));
    assert_eq!(roster.local_player_number(), Some(2));
    assert_eq!(roster.players().len(), 2);
    assert_eq!(roster.player(0).map(|p| p.name.as_str()), Some("ada"));
    assert_eq!(roster.player(1).map(|p| p.record.wins), Some(1));
}

#[test]
fn game_tables_update_in_place() {
    let mut roster = Roster::new();
    roster.apply_player_info(&two_player_info());
    roster.apply_game_tables(&[10, 12], &[4, 2], &[3, 1]);

    assert_eq!(roster.player(0).map(|p| p.score), Some(10));
    assert_eq!(roster.local_bites(), 2);
    assert_eq!(roster.local_rerolls(), 1);
}

#[test]
fn game_tables_before_player_info_do_not_panic() {
    let mut roster = Roster::new();
    roster.apply_game_tables(&[5, 6], &[1, 1], &[0, 0]);
    assert_eq!(roster.players().len(), 2);
    assert_eq!(roster.local_bites(), 0);
}

#[test]
fn player_info_preserves_scores_from_earlier_snapshots() {
    let mut roster = Roster::new();
    roster.apply_game_tables(&[7, 8], &[2, 2], &[1, 1]);
    roster.apply_player_info(&two_player_info());
    assert_eq!(roster.player(0).map(|p| p.score), Some(7));
    assert_eq!(roster.local_bites(), 2);
}

#[test]
fn leader_is_the_first_positive_score() {
    let mut roster = Roster::new();
    roster.apply_player_info(&two_player_info());
    assert_eq!(roster.leader_name(&[0, 9]), Some("kay"));
    assert_eq!(roster.leader_name(&[3, 9]), Some("ada"));
    assert_eq!(roster.leader_name(&[0, 0]), None);
}
