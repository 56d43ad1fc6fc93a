//! Browser bindings for an in-page renderer.

use js_sys::{Array, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::console;

use crate::game::Quoridor;
use crate::player::PlayerCount;
use crate::search::{AlphaBeta, SearchConfig};

fn log(message: &str) {
    console::log_1(&JsValue::from_str(message));
}

#[wasm_bindgen]
pub struct QuoridorGame {
    game: Quoridor,
    search: SearchConfig,
}

#[wasm_bindgen]
impl QuoridorGame {
    /// A started game for 2 or 4 players named "Player 1" and up.
    #[wasm_bindgen(constructor)]
    pub fn new(players: usize) -> Result<QuoridorGame, JsError> {
        console_error_panic_hook::set_once();
        let seats = match players {
            2 => PlayerCount::Two,
            4 => PlayerCount::Four,
            n => return Err(JsError::new(&format!("{n} players is not a Quoridor game"))),
        };
        let mut game = Quoridor::new(seats);
        for seat in 1..=players {
            game.create_player(&format!("Player {seat}"))?;
        }
        game.begin_game()?;
        Ok(QuoridorGame {
            game,
            search: SearchConfig::default(),
        })
    }

    /// Plays `turn` for whoever is to move.
    pub fn do_turn(&mut self, turn: &str) -> Result<(), JsError> {
        let player = self.game.current_player();
        self.game.do_turn(player, turn)?;
        if let Some(winner) = self.game.winner() {
            log(&format!("{winner} wins"));
        }
        Ok(())
    }

    pub fn turn_is_legal(&mut self, turn: &str) -> bool {
        self.game.turn_is_legal(turn).0
    }

    /// Why `turn` would be rejected; empty if it is legal.
    pub fn illegal_reason(&mut self, turn: &str) -> String {
        self.game.turn_is_legal(turn).1
    }

    pub fn legal_moves(&self) -> Array {
        self.game
            .legal_destinations()
            .iter()
            .map(|cell| JsValue::from_str(&cell.to_string()))
            .collect()
    }

    pub fn legal_walls(&mut self) -> Array {
        self.game
            .legal_walls()
            .iter()
            .map(|wall| JsValue::from_str(&wall.to_string()))
            .collect()
    }

    /// 1-based seat of the player to move.
    pub fn current_player(&self) -> usize {
        self.game.current_player().0 + 1
    }

    pub fn winner(&self) -> Option<usize> {
        self.game.winner().map(|id| id.0 + 1)
    }

    pub fn summary_json(&self) -> Result<String, JsError> {
        Ok(self.game.summary().to_json()?)
    }

    pub fn summary_text(&self) -> String {
        self.game.summary().to_string()
    }

    pub fn undo(&mut self) -> Option<String> {
        self.game.undo().map(|turn| turn.to_string())
    }

    pub fn redo(&mut self) -> Option<String> {
        self.game.redo().map(|turn| turn.to_string())
    }

    pub fn set_search_depth(&mut self, depth: usize) {
        self.search.depth = depth.max(1);
    }

    /// Resolves to the AI's turn for the player to move, or `null`.
    ///
    /// There are no threads on this target, so the search runs to completion
    /// when the promise is polled.
    pub fn ai_move(&self) -> Promise {
        let mut game = self.game.copy();
        let config = self.search.clone();
        future_to_promise(async move {
            let outcome = AlphaBeta::new(config).search(&mut game);
            Ok(match outcome {
                Some(outcome) => {
                    log(&format!(
                        "ai chose {} (score {}, {} nodes)",
                        outcome.turn, outcome.score, outcome.stats.nodes
                    ));
                    JsValue::from_str(&outcome.notation())
                }
                None => JsValue::NULL,
            })
        })
    }
}
