use std::sync::Arc;

use crate::api::models::ErrorMessage;
use crate::api::operations::ErrorMessageOperations;
use crate::error::Result;
use crate::session::{Permission, SessionAuthority};

const DEFAULT_PAGE_SIZE: u32 = 10;

pub struct ErrorListView {
    authority: Arc<SessionAuthority>,
    pub errors: Vec<ErrorMessage>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub is_admin: bool,
    pub notice: Option<String>,
}

impl ErrorListView {
    pub fn mount(authority: Arc<SessionAuthority>) -> Self {
        let is_admin = authority.has_permission(Permission::CanReadUsers);
        Self {
            authority,
            errors: Vec::new(),
            current_page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_pages: 0,
            total_elements: 0,
            is_admin,
            notice: None,
        }
    }

    /// 管理员分页加载，分页接口失败时退回全量接口
    pub async fn load(&mut self) -> Result<()> {
        if !self.is_admin {
            return self.load_all().await;
        }

        match ErrorMessageOperations::page(self.authority.api(), self.current_page, self.page_size)
            .await
        {
            Ok(page) => {
                self.total_pages = page.total_pages.max(1);
                self.total_elements = if page.total_elements > 0 {
                    page.total_elements
                } else {
                    page.content.len() as u64
                };
                self.errors = page.content;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading errors page, falling back to full list: {}", e);
                self.load_all().await
            }
        }
    }

    pub async fn load_all(&mut self) -> Result<()> {
        match ErrorMessageOperations::all(self.authority.api()).await {
            Ok(errors) => {
                self.total_elements = errors.len() as u64;
                self.total_pages = (errors.len() as u32).div_ceil(self.page_size.max(1));
                self.errors = errors;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading errors: {}", e);
                self.notice = Some(e.notice("loading error messages"));
                Err(e)
            }
        }
    }

    /// 越界页码被忽略，返回是否翻页
    pub async fn change_page(&mut self, page: u32) -> Result<bool> {
        if page >= self.total_pages {
            return Ok(false);
        }
        self.current_page = page;
        self.load().await?;
        Ok(true)
    }

    pub fn page_numbers(&self) -> Vec<u32> {
        (0..self.total_pages).collect()
    }
}
