//! Collision tests between the player and other entities
//!
//! Carrots are only caught by the carried bag, never by the bunny's body.
//! Obstacles hit the full body.

use super::entities::{Body, Carrot, Obstacle, Player};
use super::rect::Rect;
use crate::consts::{BAG_HEIGHT, BAG_WIDTH};

/// The bag's hitbox: horizontally centered on the player, sitting on top of it
pub fn catch_zone(player: &Player) -> Rect {
    Rect::new(
        player.pos.x + (player.size.x - BAG_WIDTH) / 2.0,
        player.pos.y - BAG_HEIGHT,
        BAG_WIDTH,
        BAG_HEIGHT,
    )
}

/// Check whether the carrot lands in the player's bag
pub fn carrot_caught(player: &Player, carrot: &Carrot) -> bool {
    carrot.bounds().overlaps(&catch_zone(player))
}

/// Check whether the obstacle touches the player's body
pub fn obstacle_hits_player(player: &Player, obstacle: &Obstacle) -> bool {
    obstacle.bounds().overlaps(&player.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entities::ObstacleKind;

    #[test]
    fn test_catch_zone_geometry() {
        let player = Player::new();
        let zone = catch_zone(&player);
        assert_eq!(zone.left(), player.pos.x - 4.0);
        assert_eq!(zone.bottom(), player.pos.y);
        assert_eq!(zone.size.x, BAG_WIDTH);
        assert_eq!(zone.size.y, BAG_HEIGHT);
    }

    #[test]
    fn test_carrot_in_bag_is_caught() {
        let player = Player::new();
        let zone = catch_zone(&player);
        let mut carrot = Carrot::new(1, zone.left() + 10.0, 2.0);
        carrot.pos.y = zone.top() - 5.0;
        assert!(carrot_caught(&player, &carrot));
    }

    #[test]
    fn test_body_does_not_catch() {
        let player = Player::new();
        let mut carrot = Carrot::new(1, player.pos.x + 8.0, 2.0);
        // Fully inside the body, below the bag
        carrot.pos.y = player.pos.y + 8.0;
        assert!(!carrot_caught(&player, &carrot));
    }

    #[test]
    fn test_carrot_touching_bag_edge_is_not_caught() {
        let player = Player::new();
        let zone = catch_zone(&player);
        let mut carrot = Carrot::new(1, zone.left() + 10.0, 2.0);
        carrot.pos.y = zone.top() - CARROT_SIZE;
        assert!(!carrot_caught(&player, &carrot));
    }

    #[test]
    fn test_obstacle_hits_body() {
        let player = Player::new();
        let mut obstacle = Obstacle::new(1, ObstacleKind::Log, 2.5);
        obstacle.pos.x = player.pos.x + 10.0;
        assert!(obstacle_hits_player(&player, &obstacle));

        obstacle.pos.x = player.pos.x + player.size.x;
        assert!(!obstacle_hits_player(&player, &obstacle));
    }

    #[test]
    fn test_jump_clears_obstacle() {
        let mut player = Player::new();
        let mut obstacle = Obstacle::new(1, ObstacleKind::Rock, 2.5);
        obstacle.pos.x = player.pos.x;
        player.pos.y = obstacle.pos.y - player.size.y;
        assert!(!obstacle_hits_player(&player, &obstacle));
    }
}
