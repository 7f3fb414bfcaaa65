#![forbid(unsafe_code)]

pub mod order;

pub mod ids {
    /// Identifier of a stored record (`HS-0000002A`) or of the parent that scopes it.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ItemId(String);

    impl ItemId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, ItemIdError> {
            let value = value.into();
            validate_item_id(&value)?;
            Ok(Self(value))
        }
    }

    impl std::fmt::Display for ItemId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum ItemIdError {
        Empty,
        TooLong,
        InvalidFirstChar,
        InvalidChar { ch: char, index: usize },
    }

    impl ItemIdError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "id must not be empty",
                Self::TooLong => "id is too long",
                Self::InvalidFirstChar => "id must start with an ascii letter or digit",
                Self::InvalidChar { .. } => "id may only contain ascii letters, digits, '-' and '_'",
            }
        }
    }

    fn validate_item_id(value: &str) -> Result<(), ItemIdError> {
        if value.is_empty() {
            return Err(ItemIdError::Empty);
        }
        if value.len() > 64 {
            return Err(ItemIdError::TooLong);
        }
        let mut chars = value.chars();
        let Some(first) = chars.next() else {
            return Err(ItemIdError::Empty);
        };
        if !first.is_ascii_alphanumeric() {
            return Err(ItemIdError::InvalidFirstChar);
        }
        for (index, ch) in value.chars().enumerate().skip(1) {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_') {
                continue;
            }
            return Err(ItemIdError::InvalidChar { ch, index });
        }
        Ok(())
    }
}

pub mod model {
    /// Every ordered collection the site renders. Each one owns its own order sequence,
    /// either globally or per parent record.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum CollectionKind {
        HeroStep,
        ProgramTab,
        TabButton,
        ProgramCategory,
        FaqCategory,
        FaqItem,
        PartnerPage,
    }

    impl CollectionKind {
        pub const ALL: [CollectionKind; 7] = [
            CollectionKind::HeroStep,
            CollectionKind::ProgramTab,
            CollectionKind::TabButton,
            CollectionKind::ProgramCategory,
            CollectionKind::FaqCategory,
            CollectionKind::FaqItem,
            CollectionKind::PartnerPage,
        ];

        /// Collection name; doubles as the table name and the admin action prefix.
        pub fn as_str(self) -> &'static str {
            match self {
                CollectionKind::HeroStep => "hero_steps",
                CollectionKind::ProgramTab => "program_tabs",
                CollectionKind::TabButton => "tab_buttons",
                CollectionKind::ProgramCategory => "program_categories",
                CollectionKind::FaqCategory => "faq_categories",
                CollectionKind::FaqItem => "faq_items",
                CollectionKind::PartnerPage => "partner_pages",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            let value = value.trim();
            Self::ALL.into_iter().find(|kind| kind.as_str() == value)
        }

        pub fn id_prefix(self) -> &'static str {
            match self {
                CollectionKind::HeroStep => "HS",
                CollectionKind::ProgramTab => "PT",
                CollectionKind::TabButton => "TB",
                CollectionKind::ProgramCategory => "PC",
                CollectionKind::FaqCategory => "FC",
                CollectionKind::FaqItem => "FQ",
                CollectionKind::PartnerPage => "PP",
            }
        }

        /// The kind whose records scope this collection, if the order is not global.
        pub fn parent(self) -> Option<CollectionKind> {
            match self {
                CollectionKind::TabButton => Some(CollectionKind::ProgramTab),
                CollectionKind::FaqItem => Some(CollectionKind::FaqCategory),
                _ => None,
            }
        }

        pub fn is_scoped(self) -> bool {
            self.parent().is_some()
        }

        /// Collections whose scope is a record of this kind.
        pub fn children(self) -> impl Iterator<Item = CollectionKind> {
            Self::ALL
                .into_iter()
                .filter(move |kind| kind.parent() == Some(self))
        }
    }

    impl std::fmt::Display for CollectionKind {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.as_str())
        }
    }
}
