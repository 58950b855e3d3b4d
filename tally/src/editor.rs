use std::borrow::Cow;

use reedline::{
    EditMode, Emacs, Prompt, PromptEditMode, PromptHistorySearch, Reedline, Signal, Vi,
};

pub struct Editor {
    editor: Reedline,
    prompt: TallyPrompt,
}

pub enum EditorRead {
    Read(String),
    Break,
    Continue,
}

impl Editor {
    #[must_use]
    pub fn new(vi: bool) -> Self {
        let edit_mode: Box<dyn EditMode> = if vi {
            Box::new(Vi::default())
        } else {
            Box::new(Emacs::default())
        };

        let editor = Reedline::create().with_edit_mode(edit_mode);
        let prompt = TallyPrompt;

        Self { editor, prompt }
    }

    pub fn read(&mut self) -> std::io::Result<EditorRead> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(input) if input.trim().is_empty() => Ok(EditorRead::Continue),
            Signal::Success(input) => Ok(EditorRead::Read(input)),
            Signal::CtrlC | Signal::CtrlD => Ok(EditorRead::Break),
        }
    }
}

/// `= ` on the left, nothing else.
pub struct TallyPrompt;

impl Prompt for TallyPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed("= ")
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Owned(format!("(search: {}) ", history_search.term))
    }
}
