//! Report handlers: list, create, set paid status, delete

pub mod handlers;

pub use handlers::{
    ChangesResponse, RelatorioState, SuccessResponse, create_relatorio, delete_relatorio,
    list_relatorios, set_relatorio_paid,
};
