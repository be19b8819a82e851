//! Static text shown by the dashboard: the variable glossary and the
//! "What is Findex?" blurb.

pub const FINDEX_URL: &str = "https://www.worldbank.org/en/publication/globalfindex";

pub const ABOUT_FINDEX: &str = "The Global Findex database provides comprehensive data on how \
adults worldwide save, borrow, make payments, and manage risk. Launched with support from the \
Bill & Melinda Gates Foundation, the database is updated every three years and is the world's \
most detailed dataset on how adults use formal and informal financial services. It offers \
insights into the financial behaviors and access to financial systems globally.";

pub const OVERVIEW_INTRO: &str = "This application leverages the Global Findex 2021 dataset with \
over 140,000 participants to explore financial inclusion and behavior across various economies \
worldwide.";

/// (title, description) of each view, listed under the overview chart.
pub const FEATURES: [(&str, &str); 4] = [
    (
        "Quick Visualization",
        "Instantly visualize the percentage of respondents from each country who participate in various financial services.",
    ),
    (
        "Regional Analysis",
        "Explore financial trends and behaviors by country and region, identifying disparities in access to financial systems.",
    ),
    (
        "Income-Based Analysis",
        "Analyze financial behaviors like savings, borrowing, and digital payments across different income levels.",
    ),
    (
        "Gender-Based Analysis",
        "Compare financial inclusion patterns between genders, looking into variables such as account ownership, borrowing, and savings behavior.",
    ),
];

/// Documented survey columns, in the order the codebook lists them.
pub const VARIABLES: [(&str, &str); 42] = [
    ("economy", "The name of the country or economy."),
    ("economycode", "ISO 3-digit code representing each economy."),
    ("regionwb", "World Bank region classification (e.g., Sub-Saharan Africa, East Asia, etc.)."),
    ("pop_adult", "The population of adults (aged 15+) in the economy."),
    ("wpid_random", "A unique identifier for each respondent in the dataset."),
    ("wgt", "Survey weight for each respondent, used to make the sample representative of the population."),
    ("female", "Gender of the respondent (1 if female, 2 if male)."),
    ("age", "Age of the respondent."),
    ("educ", "Respondent's education level from level 1 to 3."),
    ("inc_q", "Income quintile of the respondent's household."),
    ("emp_in", "Employment status of the respondent."),
    ("account", "Whether the respondent has an account at a financial institution or with a mobile money service provider."),
    ("account_fin", "Whether the respondent has an account at a formal financial institution."),
    ("fin2", "Has a debit card."),
    ("fin14_1", "Whether the respondent used mobile money."),
    ("fin14a", "Made bill payments online using the Internet."),
    ("fin14a1", "Sent money to a relative or friend online using the Internet."),
    ("fin14b", "Bought something online using the Internet."),
    ("fin16", "Saved for old age."),
    ("fin17a", "Saved using an account at a financial institution."),
    ("fin20", "Borrowed for medical purposes."),
    ("fin22a", "Borrowed from a financial institution."),
    ("fin22b", "Borrowed from family or friends."),
    ("fin24", "Main source of emergency funds in 30 days."),
    ("fin30", "Paid a utility bill."),
    ("fin32", "Received wage payments."),
    ("fin37", "Received a government transfer."),
    ("fin38", "Received a government pension."),
    ("fin44a", "Financially worried: old age."),
    ("fin44b", "Financially worried: medical cost."),
    ("fin44c", "Financially worried: bills."),
    ("fin44d", "Financially worried: education."),
    ("saved", "Saved money in the past 12 months."),
    ("borrowed", "Borrowed money in the past 12 months."),
    ("receive_wages", "Received a wage payment and method."),
    ("receive_transfers", "Received government transfers or aid payments and method."),
    ("receive_pension", "Received government pension payments and method."),
    ("pay_utilities", "Paid utility bills and method."),
    ("mobileowner", "Whether the respondent owns a mobile phone."),
    ("internetaccess", "Whether the respondent has access to the internet."),
    ("anydigpayment", "Whether the respondent made any digital payment."),
    ("year", "The year of the data collection."),
];

/// Description of a documented column.
pub fn describe(column: &str) -> Option<&'static str> {
    VARIABLES
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, text)| *text)
}
