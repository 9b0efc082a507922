//! Query strings sent to the content store

/// Every post, reduced to what path enumeration needs
pub const POST_STUBS: &str = r#"*[_type == "post"] {_id, slug {current}}"#;

/// One post by slug, joined with its author and approved comments
pub const POST_BY_SLUG: &str = r#"*[_type == "post" && slug.current == $slug][0] {
  _id,
  _createdAt,
  title,
  description,
  mainImage,
  slug,
  body,
  author -> {name, image},
  'comments': *[_type == "comment" && post._ref == ^._id && approved == true]
}"#;
