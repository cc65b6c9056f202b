// 页面模型
// 每个页面只保存状态、执行操作并给出提示文本，不涉及具体渲染

pub mod error_list;
pub mod login;
pub mod order_create;
pub mod order_list;
pub mod user_form;
pub mod user_list;

pub use error_list::ErrorListView;
pub use login::LoginView;
pub use order_create::OrderCreateView;
pub use order_list::{OrderListAffordances, OrderListView};
pub use user_form::{UserAddView, UserEditView};
pub use user_list::{UserListAffordances, UserListView};

/// 权限复选框的切换，重复勾选不产生重复项
pub(crate) fn toggle_permission(
    permissions: &mut std::collections::BTreeSet<String>,
    permission: crate::session::Permission,
    checked: bool,
) {
    if checked {
        permissions.insert(permission.as_str().to_string());
    } else {
        permissions.remove(permission.as_str());
    }
}
