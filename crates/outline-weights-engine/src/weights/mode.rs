//! Host-facing switches: turn the engine on and off for an editor, and
//! flip between weights and hidden-lines display.

use log::info;
use outline_weights_config::{DialectName, WeightsConfig};

use crate::editing::Editor;
use crate::outline::dialect_for;
use crate::weights::{DisplayMode, WeightsSession};

pub const ENABLED_MESSAGE: &str = "Outline weights enabled";
pub const DISABLED_MESSAGE: &str = "Outline weights disabled";
pub const SHOWING_WEIGHTS_MESSAGE: &str = "Showing outline weights";
pub const SHOWING_HIDDEN_LINES_MESSAGE: &str = "Showing hidden lines";

pub fn is_enabled(editor: &Editor) -> bool {
    editor.hook::<WeightsSession>().is_some()
}

fn start(editor: &mut Editor, mut session: WeightsSession) {
    session.activate(editor.document_mut());
    editor.install(Box::new(session));
}

/// Activate a fresh session and install it as the editor's hooks. Any
/// session already installed is torn down first.
pub fn enable(editor: &mut Editor, dialect: DialectName, config: &WeightsConfig) -> &'static str {
    disable(editor);
    start(editor, WeightsSession::new(dialect_for(dialect), config));
    info!("enabled outline weights ({:?})", dialect);
    ENABLED_MESSAGE
}

/// Uninstall the session and remove every trace of it from the document.
pub fn disable(editor: &mut Editor) -> &'static str {
    if let Some(mut hook) = editor.uninstall::<WeightsSession>()
        && let Some(session) = hook.as_any_mut().downcast_mut::<WeightsSession>()
    {
        session.deactivate(editor.document_mut());
    }
    DISABLED_MESSAGE
}

pub fn toggle(editor: &mut Editor, dialect: DialectName, config: &WeightsConfig) -> &'static str {
    if is_enabled(editor) {
        disable(editor)
    } else {
        enable(editor, dialect, config)
    }
}

/// Switch display mode with a full deactivate and reactivate cycle. When
/// the engine is off it is turned on in the mode the configuration does not
/// default to.
pub fn toggle_display(
    editor: &mut Editor,
    dialect: DialectName,
    config: &WeightsConfig,
) -> &'static str {
    let current = editor
        .hook::<WeightsSession>()
        .map(|s| s.mode())
        .unwrap_or(DisplayMode::from_show_weights(config.show_weights));
    let next = current.toggled();

    disable(editor);
    start(
        editor,
        WeightsSession::with_mode(dialect_for(dialect), config, next),
    );

    match next {
        DisplayMode::Weights => SHOWING_WEIGHTS_MESSAGE,
        DisplayMode::HiddenLines => SHOWING_HIDDEN_LINES_MESSAGE,
    }
}
