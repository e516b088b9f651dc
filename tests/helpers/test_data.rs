//! Fixture data shared by the integration tests

/// First user on the allow-list
pub const FIRST_USER_ID: i64 = 111_111_111;

/// Second user on the allow-list
pub const SECOND_USER_ID: i64 = 222_222_222;

/// A user that is not on the allow-list
pub const STRANGER_ID: i64 = 999_888_777;

/// Menu labels of the default language
pub const ADD_EXPENSE: &str = "Добавить расход";
pub const ADD_INCOME: &str = "Добавить доход";
pub const ANALYTICS: &str = "Аналитика";

/// A completed dialog entry
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub income: bool,
    pub amount: &'static str,
    pub category: &'static str,
}

impl Entry {
    pub const fn expense(amount: &'static str, category: &'static str) -> Self {
        Self { income: false, amount, category }
    }

    pub const fn income(amount: &'static str, category: &'static str) -> Self {
        Self { income: true, amount, category }
    }

    /// Messages that record this entry from idle
    pub fn messages(&self) -> [&'static str; 3] {
        let command = if self.income { ADD_INCOME } else { ADD_EXPENSE };
        [command, self.amount, self.category]
    }
}

/// A small month of household entries
pub fn sample_month() -> Vec<Entry> {
    vec![
        Entry::income("50000", "Зарплата"),
        Entry::expense("1200,50", "Еда"),
        Entry::expense("350", "Транспорт"),
        Entry::income("1500", "Кэшбек"),
        Entry::expense("799.99", "Подписки"),
    ]
}
