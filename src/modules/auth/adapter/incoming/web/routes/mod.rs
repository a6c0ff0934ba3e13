mod current_admin;
mod login_admin;

pub use current_admin::{__path_current_admin_handler, current_admin_handler, CurrentAdminResponse};
pub use login_admin::{
    __path_login_admin_handler, login_admin_handler, LoginAdminInfo, LoginRequestDto,
    LoginResponse,
};
