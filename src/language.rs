#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Language {
  pub(crate) code: &'static str,
  pub(crate) label: &'static str,
}

impl Language {
  pub(crate) const DEFAULT: Language = Language {
    code: "en",
    label: "English",
  };

  pub(crate) fn all() -> &'static [Language] {
    &[
      Language::DEFAULT,
      Language {
        code: "es",
        label: "Spanish",
      },
      Language {
        code: "fr",
        label: "French",
      },
      Language {
        code: "de",
        label: "German",
      },
      Language {
        code: "ru",
        label: "Russian",
      },
      Language {
        code: "uk",
        label: "Ukrainian",
      },
      Language {
        code: "hi",
        label: "Hindi",
      },
      Language {
        code: "zh",
        label: "Chinese",
      },
      Language {
        code: "ja",
        label: "Japanese",
      },
    ]
  }

  pub(crate) fn is_default(self) -> bool {
    self.code == Self::DEFAULT.code
  }
}
