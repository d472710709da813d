// Adapters for the app-layer ports

pub mod csv_output_adapter;
pub mod people_search;
pub mod savant_client;

pub use csv_output_adapter::CsvReportOutputAdapter;
pub use people_search::PeopleSearchResolver;
pub use savant_client::SavantClient;
