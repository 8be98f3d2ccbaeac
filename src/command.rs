use super::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Command {
  CancelCompose,
  ClosePicker,
  ComposeBackspace,
  ComposeInput(char),
  ConfirmPicker,
  DeleteAll,
  DeleteComment(i64),
  DeleteSelected,
  DismissPrompt,
  HideHelp,
  None,
  OpenPromptUrl,
  OpenSessionUrl,
  PickerNext,
  PickerPrevious,
  Quit,
  Reload,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  SetLimit(usize),
  ShowHelp,
  ShowLanguagePicker,
  ShowLimitPicker,
  StartCompose,
  SubmitCompose,
  ToggleComposeField,
  Translate(Language),
}
