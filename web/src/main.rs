use dioxus::prelude::*;

use ui::components::AppHeader;
use ui::views::Home;

/// Rasterizer used by the PNG export (`html2canvas(node, options)`).
const HTML2CANVAS_SRC: &str = "https://html2canvas.hertzen.com/dist/html2canvas.min.js";

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // Global reactive language code; AppHeader updates it on selection.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    rsx! {
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }
        document::Script { src: HTML2CANVAS_SRC }

        AppHeader {}
        Home {}
    }
}
