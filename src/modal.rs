// About / API informational modals. At most one is open.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modal {
    About,
    Api,
}

impl Modal {
    pub fn title(self) -> &'static str {
        match self {
            Modal::About => "关于汽车知识图谱",
            Modal::Api => "API 说明",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            Modal::About => {
                "基于汽车知识图谱的智能查询系统，支持自然语言描述预算、车型与能源类型，返回匹配的车系信息。"
            }
            Modal::Api => {
                "POST /api/query，请求体为 {query, filters, page, page_size}，返回 {success, results, page} 或 {success: false, error}。"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalState {
    open: Option<Modal>,
}

impl ModalState {
    pub fn open(&mut self, modal: Modal) {
        self.open = Some(modal);
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn current(&self) -> Option<Modal> {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_replaces_and_close_clears() {
        let mut modals = ModalState::default();
        assert_eq!(modals.current(), None);
        modals.open(Modal::About);
        modals.open(Modal::Api);
        assert_eq!(modals.current(), Some(Modal::Api));
        modals.close();
        assert_eq!(modals.current(), None);
    }
}
