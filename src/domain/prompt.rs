//! Prompt Formatting - 对话历史展开
//!
//! 将多轮对话历史展开为单条 prompt，供不支持会话状态的生成调用使用

/// 对话消息
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// 角色: "user" 或 "assistant"
    pub role: String,
    /// 消息内容
    pub content: String,
}

/// 将消息历史格式化为单条 prompt
///
/// 逐条标注角色，末尾追加生成指令。未知角色按 user 处理
pub fn format_history(messages: &[ChatMessage]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(messages.len() + 1);

    for message in messages {
        let label = match message.role.as_str() {
            "assistant" => "Assistant",
            _ => "User",
        };
        lines.push(format!("{}: {}", label, message.content));
    }

    lines.push("Based on the conversation above, generate an appropriate reply:".to_string());

    lines.join("\n")
}
