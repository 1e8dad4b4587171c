//! Flood-fill infection puzzle engine.
//!
//! Starting from the top-left cell, the player picks a strain each turn; the
//! infected region takes that strain, absorbs adjacent cells of it, and swallows
//! any pocket it fully encloses. The engine is pure Rust with no rendering; a
//! browser UI drives it through the `VirusGame` class exported for wasm32.
//!
//! Grid data crosses the boundary as flat row-major arrays:
//! `cells[y * width + x]`.

pub mod advisor;
pub mod board;
pub mod capture;
pub mod config;
pub mod error;
pub mod flood;
pub mod game;
pub mod rng;
pub mod score;
pub mod session;
pub mod types;

pub use advisor::Hint;
pub use config::GameConfig;
pub use error::{ConfigError, MoveRejected, StoreError, UndoError};
pub use game::{Game, MoveReport};
pub use score::{BestScores, ConfigKey, MemoryStore, ScoreStore};
pub use session::{MoveOutcome, PlayState, Session, SessionSnapshot};
pub use types::{Board, Strain};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use js_sys::{Function, Reflect};
    use serde::{Deserialize, Serialize};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::config::GameConfig;
    use crate::error::StoreError;
    use crate::game::Game;
    use crate::score::{MemoryStore, ScoreStore};

    /// Adapter for any JS object with `getItem`/`setItem`/`removeItem`,
    /// normally `window.localStorage`.
    struct JsStorage {
        target: JsValue,
    }

    impl JsStorage {
        fn method(&self, name: &str) -> Option<Function> {
            Reflect::get(&self.target, &name.into()).ok()?.dyn_into::<Function>().ok()
        }

        /// Call `setItem` (with a value) or `removeItem`, surfacing anything it throws.
        fn call(
            &self,
            method: &'static str,
            key: &str,
            value: Option<String>,
        ) -> Result<(), StoreError> {
            let f = self.method(method).ok_or(StoreError::Unsupported { method })?;
            let result = match value {
                Some(value) => f.call2(&self.target, &key.into(), &value.into()),
                None => f.call1(&self.target, &key.into()),
            };
            result.map(drop).map_err(|e| {
                let reason = e
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
                    .or_else(|| e.as_string())
                    .unwrap_or_else(|| format!("{e:?}"));
                StoreError::Rejected {
                    key: key.to_owned(),
                    reason,
                }
            })
        }
    }

    impl ScoreStore for JsStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.method("getItem")?
                .call1(&self.target, &key.into())
                .ok()?
                .as_string()
        }

        fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
            self.call("setItem", key, Some(value))
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.call("removeItem", key, None)
        }
    }

    /// Options object accepted by `new VirusGame(...)` and `newGame(...)`.
    /// `size` sets both sides; `width`/`height` override it.
    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct GameOptions {
        size: Option<usize>,
        width: Option<usize>,
        height: Option<usize>,
        strains: Option<u8>,
        seed: Option<String>,
    }

    impl GameOptions {
        fn config(&self) -> GameConfig {
            let base = GameConfig::default();
            let side = |v: Option<usize>, fallback: usize| v.or(self.size).unwrap_or(fallback);
            GameConfig::new(
                side(self.width, base.width),
                side(self.height, base.height),
                self.strains.unwrap_or(base.strains),
            )
        }
    }

    fn parse_options(options: JsValue) -> Result<GameOptions, JsError> {
        if options.is_undefined() || options.is_null() {
            return Ok(GameOptions::default());
        }
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Plain JS objects, never `Map`s, so the UI can read fields directly.
    fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
        value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// A game session plus best-score storage, driven from JavaScript.
    #[wasm_bindgen]
    pub struct VirusGame {
        inner: Game<Box<dyn ScoreStore>>,
    }

    #[wasm_bindgen]
    impl VirusGame {
        /// `storage` may be `localStorage` or omitted for in-memory scores.
        #[wasm_bindgen(constructor)]
        pub fn new(options: JsValue, storage: JsValue) -> Result<VirusGame, JsError> {
            let options = parse_options(options)?;
            let store: Box<dyn ScoreStore> = if storage.is_object() {
                Box::new(JsStorage { target: storage })
            } else {
                Box::new(MemoryStore::new())
            };
            let inner = Game::new(options.config(), options.seed.as_deref(), store)?;
            Ok(VirusGame { inner })
        }

        #[wasm_bindgen(js_name = "newGame")]
        pub fn new_game(&mut self, options: JsValue) -> Result<(), JsError> {
            let options = parse_options(options)?;
            self.inner.new_game(options.config(), options.seed.as_deref())?;
            Ok(())
        }

        #[wasm_bindgen(js_name = "playAgain")]
        pub fn play_again(&mut self) -> Result<(), JsError> {
            self.inner.play_again()?;
            Ok(())
        }

        /// Returns `{ status: "applied", ... }` or `{ status: "rejected", reason }`.
        #[wasm_bindgen(js_name = "applyMove")]
        pub fn apply_move(&mut self, strain: u8) -> Result<JsValue, JsError> {
            let result = self.inner.apply_move(strain);
            to_js(&self.inner.report(result))
        }

        #[wasm_bindgen(js_name = "chooseCell")]
        pub fn choose_cell(&mut self, x: usize, y: usize) -> Result<JsValue, JsError> {
            let result = self.inner.choose_cell(x, y);
            to_js(&self.inner.report(result))
        }

        /// Returns false when there was nothing to undo.
        pub fn undo(&mut self) -> bool {
            self.inner.undo().is_ok()
        }

        /// `{ strain, size, gain }` or `null`.
        pub fn hint(&self) -> Result<JsValue, JsError> {
            match self.inner.hint() {
                Some(hint) => to_js(&hint),
                None => Ok(JsValue::NULL),
            }
        }

        #[wasm_bindgen(js_name = "suggestBestMove")]
        pub fn suggest_best_move(&self) -> Option<u8> {
            self.inner.suggest_best_move()
        }

        #[wasm_bindgen(js_name = "infectedPercent")]
        pub fn infected_percent(&self) -> u8 {
            self.inner.infected_percent()
        }

        #[wasm_bindgen(js_name = "isWon")]
        pub fn is_won(&self) -> bool {
            self.inner.is_won()
        }

        /// The resolved seed, so a random game can be shared or replayed.
        pub fn seed(&self) -> String {
            self.inner.session().seed().to_owned()
        }

        pub fn snapshot(&self) -> Result<JsValue, JsError> {
            to_js(&self.inner.session().snapshot())
        }

        pub fn summary(&self) -> String {
            self.inner.session().summary()
        }

        #[wasm_bindgen(js_name = "bestScore")]
        pub fn best_score(&self) -> Option<u32> {
            self.inner.current_best()
        }

        /// Returns false if storage refused to clear the record.
        #[wasm_bindgen(js_name = "resetBestScore")]
        pub fn reset_best_score(&mut self) -> bool {
            let key = self.inner.session().config_key();
            self.inner.reset_best_score(&key)
        }
    }

    #[cfg(test)]
    mod tests {
        use js_sys::{Map, Object};
        use wasm_bindgen_test::*;

        use super::*;

        wasm_bindgen_test_configure!(run_in_browser);

        fn game(seed: &str) -> VirusGame {
            let options = to_js(&serde_json::json!({ "size": 6, "strains": 3, "seed": seed })).unwrap();
            VirusGame::new(options, JsValue::UNDEFINED).unwrap()
        }

        fn field(target: &JsValue, name: &str) -> JsValue {
            Reflect::get(target, &name.into()).unwrap()
        }

        #[wasm_bindgen_test]
        fn applied_move_is_a_plain_object() {
            let mut g = game("plain");
            let strain = (g.inner.session().current() + 1) % 3;
            let report = g.apply_move(strain).unwrap();

            assert!(!report.is_instance_of::<Map>());
            assert!(report.is_instance_of::<Object>());
            assert_eq!(field(&report, "status").as_string().as_deref(), Some("applied"));
            assert_eq!(field(&report, "moves").as_f64(), Some(1.0));
            assert_eq!(field(&report, "strain").as_f64(), Some(f64::from(strain)));
        }

        #[wasm_bindgen_test]
        fn rejected_move_carries_reason() {
            let mut g = game("reject");
            let current = g.inner.session().current();
            let report = g.apply_move(current).unwrap();

            assert!(!report.is_instance_of::<Map>());
            assert_eq!(field(&report, "status").as_string().as_deref(), Some("rejected"));
            assert!(field(&report, "reason").as_string().is_some());
        }

        #[wasm_bindgen_test]
        fn throwing_storage_does_not_count_as_saved() {
            let storage = Object::new();
            let throws = Function::new_no_args("throw new Error('quota exceeded')");
            Reflect::set(&storage, &"setItem".into(), &throws).unwrap();
            Reflect::set(&storage, &"removeItem".into(), &throws).unwrap();
            let getter = Function::new_no_args("return null");
            Reflect::set(&storage, &"getItem".into(), &getter).unwrap();

            let mut store = JsStorage { target: storage.into() };
            assert_eq!(
                store.set("k", "3".to_owned()),
                Err(StoreError::Rejected {
                    key: "k".to_owned(),
                    reason: "quota exceeded".to_owned(),
                })
            );
            assert!(store.remove("k").is_err());
        }
    }
}
