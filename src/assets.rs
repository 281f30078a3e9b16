//! Image loading with an explicit ready point
//!
//! All three images are decoded up front; `Assets::load().await` resolves
//! exactly once and gates the transition to the character-select screen.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::sim::Character;

/// The game's three preloaded images, read-only after load
pub struct Assets {
    pub background: HtmlImageElement,
    pub sunny: HtmlImageElement,
    pub coral: HtmlImageElement,
}

impl Assets {
    pub async fn load() -> Result<Self, JsValue> {
        let background = load_image("img/background.jpg").await?;
        let sunny = load_image("img/sunny.png").await?;
        let coral = load_image("img/coral.png").await?;
        log::info!("Assets loaded");
        Ok(Self {
            background,
            sunny,
            coral,
        })
    }

    /// Sprite for the selected character
    pub fn player_sprite(&self, character: Character) -> &HtmlImageElement {
        match character {
            Character::Sunny => &self.sunny,
            Character::Coral => &self.coral,
        }
    }
}

async fn load_image(src: &str) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    img.set_src(src);
    JsFuture::from(img.decode()).await?;
    Ok(img)
}
