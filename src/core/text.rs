use crate::core::state::Mode;

pub const TRUTH_LABEL: &str = "真心话";
pub const DARE_LABEL: &str = "大冒险";

pub const GENERATE_LABEL: &str = "开始游戏";
pub const RETRY_LABEL: &str = "再来一次";
pub const SCENE_PLACEHOLDER: &str = "输入场景（可选），如：聚会、旅行";

pub const STATUS_FALLBACK: &str = "请求失败，请稍后重试";
pub const DECLINED_FALLBACK: &str = "生成失败，请重试";
pub const NETWORK_FAILURE: &str = "网络错误，请检查网络后重试";

pub const KEYBOARD_HINT: &str = "💡 快捷键：空格键生成 | ESC重置";

pub fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Truth => TRUTH_LABEL,
        Mode::Dare => DARE_LABEL,
    }
}

pub fn scene_line(scene: &str) -> String {
    format!("场景：{}", scene)
}
