//! Nesting a flat, time-ordered comment list into reply trees.

use std::collections::HashMap;

use filestore_core::types::id::CommentId;

use super::dto::CommentDto;

/// Nests `flat` under each comment's parent, keeping input order among
/// siblings. Comments whose parent is absent from the list become roots.
pub(crate) fn build_thread(flat: Vec<CommentDto>) -> Vec<CommentDto> {
    let present: Vec<CommentId> = flat.iter().map(|c| c.id).collect();
    let mut children: HashMap<CommentId, Vec<CommentDto>> = HashMap::new();
    let mut roots = Vec::new();

    for comment in flat {
        match comment.parent_comment_id {
            Some(parent) if present.contains(&parent) => {
                children.entry(parent).or_default().push(comment)
            }
            _ => roots.push(comment),
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children))
        .collect()
}

fn attach(
    mut comment: CommentDto,
    children: &mut HashMap<CommentId, Vec<CommentDto>>,
) -> CommentDto {
    let replies = children.remove(&comment.id).unwrap_or_default();
    comment.replies = replies
        .into_iter()
        .map(|reply| attach(reply, children))
        .collect();
    comment
}
