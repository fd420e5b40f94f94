#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChatCommandAction {
    NotHandled,
    Continue,
    Quit,
}

pub(crate) const CHAT_HELP: &str = "commands: :help :describe :reset :quit";
