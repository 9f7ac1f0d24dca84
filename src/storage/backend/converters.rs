use crate::storage::{NewEvent, Site};
use migration::entities::{event, site};

/// 将 Sea-ORM Model 转换为 Site
pub fn model_to_site(model: site::Model) -> Site {
    Site {
        id: model.id,
        name: model.name,
        domain: model.domain,
        api_key: model.api_key,
        created_at: model.created_at,
    }
}

/// 将 Site 转换为 ActiveModel（仅插入）
pub fn site_to_active_model(site: &Site) -> site::ActiveModel {
    use sea_orm::ActiveValue::*;

    site::ActiveModel {
        id: Set(site.id.clone()),
        name: Set(site.name.clone()),
        domain: Set(site.domain.clone()),
        api_key: Set(site.api_key.clone()),
        created_at: Set(site.created_at),
    }
}

/// 将 NewEvent 转换为 ActiveModel，id 交给数据库自增
pub fn new_event_to_active_model(event: &NewEvent) -> event::ActiveModel {
    use sea_orm::ActiveValue::*;

    event::ActiveModel {
        id: NotSet,
        site_id: Set(event.site_id.clone()),
        session_hash: Set(event.session_hash.clone()),
        event_type: Set(event.event_type.clone()),
        path: Set(event.path.clone()),
        referrer_domain: Set(event.referrer_domain.clone()),
        country: Set(event.country.clone()),
        browser: Set(event.browser.clone()),
        device_type: Set(event.device_type.clone()),
        screen_bucket: Set(event.screen_bucket.clone()),
        timestamp: Set(event.timestamp),
    }
}
