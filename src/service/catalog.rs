// region:    --- Imports
use super::ServiceError;
use crate::domain::{Category, Product};
use crate::store::{EntityStore, StoreError};
use crate::validation::rules::{validate_category, validate_product};
use std::sync::Arc;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Category Service

/// 카테고리 서비스
/// 부모/자식 관계는 id 목록으로만 들고, 순환 방지는 호출자 몫
pub struct CategoryService {
    store: Arc<dyn EntityStore<Category>>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn EntityStore<Category>>) -> Self {
        CategoryService { store }
    }

    pub async fn insert(&self, category: Category) -> Result<Category, ServiceError> {
        let report = validate_category(&category);
        if !report.is_valid() {
            warn!("{:<12} --> 카테고리 등록 거절: {}", "CategorySvc", report);
            return Err(ServiceError::Rejected(report));
        }
        let stored = self.store.insert(category).await?;
        info!("{:<12} --> 카테고리 등록: id {}", "CategorySvc", stored.id);
        Ok(stored)
    }

    pub async fn update(&self, category: Category) -> Result<Category, ServiceError> {
        let report = validate_category(&category);
        if !report.is_valid() {
            warn!("{:<12} --> 카테고리 수정 거절: {}", "CategorySvc", report);
            return Err(ServiceError::Rejected(report));
        }
        match self.store.update(category).await {
            Ok(stored) => {
                info!("{:<12} --> 카테고리 수정: id {}", "CategorySvc", stored.id);
                Ok(stored)
            }
            Err(StoreError::NotFound(_, id)) => {
                warn!("{:<12} --> 카테고리 수정 거절: 없는 id {}", "CategorySvc", id);
                Err(ServiceError::rejected_on("Id", "category does not exist"))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn delete(&self, category: &Category) -> Result<(), ServiceError> {
        match self.store.delete(category).await {
            Ok(()) => {
                info!("{:<12} --> 카테고리 삭제: id {}", "CategorySvc", category.id);
                Ok(())
            }
            Err(StoreError::NotFound(_, id)) => {
                warn!("{:<12} --> 카테고리 삭제 거절: 없는 id {}", "CategorySvc", id);
                Err(ServiceError::rejected_on("Id", "category does not exist"))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Category>, ServiceError> {
        Ok(self.store.get_by_id(id).await?)
    }

    pub async fn get_all(&self) -> Result<Vec<Category>, ServiceError> {
        Ok(self.store.get_all().await?)
    }
}

// endregion: --- Category Service

// region:    --- Product Service

/// 상품 서비스
pub struct ProductService {
    store: Arc<dyn EntityStore<Product>>,
}

impl ProductService {
    pub fn new(store: Arc<dyn EntityStore<Product>>) -> Self {
        ProductService { store }
    }

    pub async fn insert(&self, product: Product) -> Result<Product, ServiceError> {
        let report = validate_product(&product);
        if !report.is_valid() {
            warn!("{:<12} --> 상품 등록 거절: {}", "ProductSvc", report);
            return Err(ServiceError::Rejected(report));
        }
        let stored = self.store.insert(product).await?;
        info!("{:<12} --> 상품 등록: id {}", "ProductSvc", stored.id);
        Ok(stored)
    }

    pub async fn update(&self, product: Product) -> Result<Product, ServiceError> {
        let report = validate_product(&product);
        if !report.is_valid() {
            warn!("{:<12} --> 상품 수정 거절: {}", "ProductSvc", report);
            return Err(ServiceError::Rejected(report));
        }
        match self.store.update(product).await {
            Ok(stored) => {
                info!("{:<12} --> 상품 수정: id {}", "ProductSvc", stored.id);
                Ok(stored)
            }
            Err(StoreError::NotFound(_, id)) => {
                warn!("{:<12} --> 상품 수정 거절: 없는 id {}", "ProductSvc", id);
                Err(ServiceError::rejected_on("Id", "product does not exist"))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn delete(&self, product: &Product) -> Result<(), ServiceError> {
        match self.store.delete(product).await {
            Ok(()) => {
                info!("{:<12} --> 상품 삭제: id {}", "ProductSvc", product.id);
                Ok(())
            }
            Err(StoreError::NotFound(_, id)) => {
                warn!("{:<12} --> 상품 삭제 거절: 없는 id {}", "ProductSvc", id);
                Err(ServiceError::rejected_on("Id", "product does not exist"))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        Ok(self.store.get_by_id(id).await?)
    }

    pub async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.store.get_all().await?)
    }

    /// 판매자가 내놓은 상품 목록
    pub async fn products_of(&self, offerer_id: i64) -> Result<Vec<Product>, ServiceError> {
        let rows = self
            .store
            .query(Some(&move |product: &Product| {
                product.offerer.as_ref().map(|offerer| offerer.id) == Some(offerer_id)
            }))
            .await?;
        Ok(rows)
    }
}

// endregion: --- Product Service

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Roles, User};
    use crate::store::MemoryStore;

    fn offerer(id: i64) -> User {
        let mut user = User::new("박판매", Roles::offerer_only());
        user.id = id;
        user
    }

    fn test_product(offerer_id: i64, name: &str) -> Product {
        Product::new(
            offerer(offerer_id),
            name,
            "필름 카메라, 작동 확인됨",
            Category::new("카메라"),
        )
    }

    #[tokio::test]
    async fn category_name_too_short_is_rejected() {
        let service = CategoryService::new(Arc::new(MemoryStore::new()));
        let error = service.insert(Category::new("a")).await.unwrap_err();
        assert!(error.report().is_some());
    }

    #[tokio::test]
    async fn product_without_offerer_role_is_rejected() {
        let service = ProductService::new(Arc::new(MemoryStore::new()));
        let mut product = test_product(1, "낡은 카메라");
        product.offerer = Some(User::new("김입찰", Roles::bidder_only()));
        let error = service.insert(product).await.unwrap_err();
        let report = error.report().expect("rejection expected");
        assert!(report
            .violations
            .iter()
            .any(|violation| violation.field == "Offerer.Role"));
    }

    #[tokio::test]
    async fn products_of_filters_by_offerer() {
        let service = ProductService::new(Arc::new(MemoryStore::new()));
        service.insert(test_product(1, "낡은 카메라")).await.unwrap();
        service.insert(test_product(2, "새 카메라")).await.unwrap();
        service.insert(test_product(1, "중고 렌즈")).await.unwrap();
        let mine = service.products_of(1).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].name, "낡은 카메라");
        assert_eq!(mine[1].name, "중고 렌즈");
    }
}
