//! Relationship linking: resolves slug references into back-links and
//! aggregation lists.

use crate::index::IndexedContent;
use crate::models::{ArenaId, ContentId, ProjectId, SiteModel};
use inkweave_types::{LinkRef, RelatedRef};

/// Link indexed content into the final site model
///
/// Projects join their topic first (once each, source order). Then a single
/// pass over content in sorted order attaches each record to its project and
/// topic and resolves its `related` list against the merged content index.
/// References that do not resolve are left out.
pub fn link(indexed: IndexedContent) -> SiteModel {
    let mut model = indexed.model;

    for (position, project) in model.projects.iter().enumerate() {
        let Some(topic_slug) = project.topic() else {
            continue;
        };
        match model.topic_index.get(topic_slug) {
            Some(topic_id) => model.topics[topic_id.index()]
                .projects
                .push(ProjectId::from_index(position)),
            None => tracing::debug!(
                "Project '{}' references unknown topic '{}'",
                project.slug,
                topic_slug
            ),
        }
    }

    for position in 0..model.posts.len() {
        let id = ContentId::from_index(position);
        link_project(&mut model, id);
        link_topic(&mut model, id);
        link_related(&mut model, id);
    }

    tracing::debug!("Linked {} content records", model.posts.len());
    model
}

fn link_project(model: &mut SiteModel, id: ContentId) {
    let record = &model.posts[id.index()];
    let Some(slug) = record.meta.project.as_deref() else {
        return;
    };
    let Some(project_id) = model.project_index.get(slug).copied() else {
        tracing::debug!("{} references unknown project '{}'", record.key(), slug);
        return;
    };

    let project = &mut model.projects[project_id.index()];
    project.posts.push(id);
    let backlink = LinkRef {
        title: project.meta.title.clone(),
        slug: project.slug.clone(),
    };
    model.posts[id.index()].project_data = Some(backlink);
}

fn link_topic(model: &mut SiteModel, id: ContentId) {
    let record = &model.posts[id.index()];
    let Some(slug) = record.meta.topic.as_deref() else {
        return;
    };
    let Some(topic_id) = model.topic_index.get(slug).copied() else {
        tracing::debug!("{} references unknown topic '{}'", record.key(), slug);
        return;
    };

    let topic = &mut model.topics[topic_id.index()];
    topic.posts.push(id);
    topic.all_items.push(id);
    let backlink = LinkRef {
        title: topic.meta.title.clone(),
        slug: topic.slug.clone(),
    };
    model.posts[id.index()].topic_data = Some(backlink);
}

fn link_related(model: &mut SiteModel, id: ContentId) {
    let record = &model.posts[id.index()];
    let Some(related) = record.meta.related.as_ref() else {
        return;
    };

    let resolved: Vec<RelatedRef> = related
        .iter()
        .filter_map(|slug| {
            let found = model.find_content(slug);
            if found.is_none() {
                tracing::debug!("{} lists unknown related '{}'", record.key(), slug);
            }
            found
        })
        .map(|found| RelatedRef {
            title: found.meta.title.clone(),
            slug: found.slug.clone(),
            content_type: found.content_type,
        })
        .collect();

    model.posts[id.index()].related_posts = Some(resolved);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_indices;
    use crate::normalize::normalize_collections;
    use crate::source::{RawCollections, RawModule};
    use inkweave_types::ContentType;
    use serde_json::{json, Value};

    fn add(collection: &mut crate::source::RawCollection, path: &str, value: Value) {
        collection.insert(path.to_string(), RawModule::from_json(value));
    }

    fn build(raw: &RawCollections) -> SiteModel {
        link(build_indices(normalize_collections(raw)))
    }

    fn fixture() -> RawCollections {
        let mut raw = RawCollections::new();
        add(&mut raw.topics, "topics/systems.md", json!({ "title": "Systems" }));
        add(&mut raw.topics, "topics/empty.md", json!({ "title": "Empty" }));
        add(
            &mut raw.projects,
            "projects/kernel.md",
            json!({ "title": "Kernel", "topic": "systems" }),
        );
        add(
            &mut raw.projects,
            "projects/orphan.md",
            json!({ "title": "Orphan", "topic": "nowhere" }),
        );
        add(
            &mut raw.blog,
            "blog/boot.md",
            json!({
                "title": "Booting",
                "date": "2024-01-01",
                "project": "kernel",
                "topic": "systems",
                "related": ["paging", "missing", "sched"],
            }),
        );
        add(
            &mut raw.blog,
            "blog/sched.md",
            json!({ "title": "Scheduling", "date": "2023-05-01", "project": "kernel" }),
        );
        add(
            &mut raw.notes,
            "notes/paging.md",
            json!({ "title": "Paging", "topic": "systems", "project": "ghost" }),
        );
        raw
    }

    #[test]
    fn test_project_backlinks() {
        let model = build(&fixture());
        let kernel = model.project("kernel").unwrap();
        let posts: Vec<_> = model.project_posts(kernel).map(|r| r.slug.as_str()).collect();
        assert_eq!(posts, vec!["boot", "sched"]);

        let boot = model.find_content("boot").unwrap();
        assert_eq!(
            boot.project_data,
            Some(LinkRef {
                title: Some("Kernel".into()),
                slug: "kernel".into(),
            })
        );
    }

    #[test]
    fn test_topic_membership_is_exactly_once() {
        let model = build(&fixture());
        let systems = model.topic("systems").unwrap();
        let posts: Vec<_> = model.topic_posts(systems).map(|r| r.slug.as_str()).collect();
        let items: Vec<_> = model.topic_items(systems).map(|r| r.slug.as_str()).collect();
        assert_eq!(posts, vec!["boot", "paging"]);
        assert_eq!(items, posts);

        let projects: Vec<_> = model.topic_projects(systems).map(|p| p.slug.as_str()).collect();
        assert_eq!(projects, vec!["kernel"]);

        let paging = model.find_content("paging").unwrap();
        assert_eq!(paging.topic_data.as_ref().map(|t| t.slug.as_str()), Some("systems"));
    }

    #[test]
    fn test_orphaned_references_leave_no_link() {
        let model = build(&fixture());
        let paging = model.find_content("paging").unwrap();
        assert!(paging.project_data.is_none());

        let empty = model.topic("empty").unwrap();
        assert!(empty.projects.is_empty());
        assert!(empty.posts.is_empty());
        assert!(model.project("orphan").unwrap().posts.is_empty());
    }

    #[test]
    fn test_related_keeps_order_and_drops_misses() {
        let model = build(&fixture());
        let boot = model.find_content("boot").unwrap();
        let related = boot.related_posts.as_ref().unwrap();
        assert_eq!(
            related,
            &vec![
                RelatedRef {
                    title: Some("Paging".into()),
                    slug: "paging".into(),
                    content_type: ContentType::Note,
                },
                RelatedRef {
                    title: Some("Scheduling".into()),
                    slug: "sched".into(),
                    content_type: ContentType::Blog,
                },
            ]
        );

        // no `related` input, no resolved list
        assert!(model.find_content("sched").unwrap().related_posts.is_none());
    }

    #[test]
    fn test_related_repeats_resolve_each_time() {
        let mut raw = RawCollections::new();
        add(&mut raw.blog, "blog/a.md", json!({ "related": ["b", "b", "b"] }));
        add(&mut raw.blog, "blog/b.md", json!({ "title": "B" }));
        let model = build(&raw);

        let related = model.find_content("a").unwrap().related_posts.as_ref().unwrap();
        let slugs: Vec<_> = related.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "b", "b"]);
    }

    #[test]
    fn test_scalar_related_is_ignored() {
        let mut raw = RawCollections::new();
        add(&mut raw.blog, "blog/a.md", json!({ "title": "A" }));
        add(&mut raw.blog, "blog/b.md", json!({ "related": "a" }));
        let model = build(&raw);

        assert!(model.find_content("b").unwrap().related_posts.is_none());
    }

    #[test]
    fn test_records_are_shared_not_copied() {
        let model = build(&fixture());
        let kernel = model.project("kernel").unwrap();
        let via_project = model.project_posts(kernel).next().unwrap();
        let via_index = model.find_content("boot").unwrap();
        assert!(std::ptr::eq(via_project, via_index));
    }
}
